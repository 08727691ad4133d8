//! gridcalc_engine - Spreadsheet formula evaluation over a grid of text cells.

pub mod engine;
pub mod error;

pub use engine::{
    CellRef, EvalOptions, EvalStats, Evaluation, ExpressionEvaluator, Grid, Value, evaluate,
    evaluate_cell, evaluate_with,
};
pub use error::{EngineError, EvaluatorError, Result};
