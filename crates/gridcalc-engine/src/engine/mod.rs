//! Formula evaluation engine API.
//!
//! - [`CellRef`] - Cell addresses (A1 notation <-> row/col indices)
//! - [`Grid`] - Ragged grid of raw cell text
//! - [`ExpressionEvaluator`], [`Value`] - The pluggable expression seam
//! - [`evaluate`], [`Evaluation`] - Memoized recursive evaluation with
//!   circular reference detection
//! - [`EvalOptions`] - Formula marker, depth limit, out-of-range fallback

mod cell_ref;
mod eval;
mod evaluator;
mod grid;
mod options;
mod resolve;
mod value;

pub use cell_ref::{CellRef, SINGLE_LETTER_COLUMNS};
pub use eval::{EvalStats, Evaluation, evaluate, evaluate_cell, evaluate_with};
pub use evaluator::ExpressionEvaluator;
pub use grid::Grid;
pub use options::{DEFAULT_MAX_DEPTH, EvalOptions, FORMULA_MARKER, OUT_OF_RANGE_LITERAL};
pub use value::Value;
