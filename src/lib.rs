//! Gridcalc - evaluate spreadsheet-style formulas embedded in a grid of text
//! cells.
//!
//! A cell whose text starts with `=` is a formula. Cell references such as
//! `A1` inside it are replaced with the referenced cell's value (evaluating
//! that cell first when it is itself a formula), and the result is computed
//! by a Rhai expression evaluator.
//!
//! ```
//! let rows = vec![
//!     vec!["5".to_string(), "10".to_string()],
//!     vec!["=A1+B1".to_string(), String::new()],
//! ];
//! let out = gridcalc::evaluate_rows(rows).unwrap();
//! assert_eq!(out[1][0], "15");
//! ```

pub use gridcalc_core::{Calculator, Config, CoreError, Result, RhaiEvaluator, RhaiLimits};
pub use gridcalc_engine::{
    CellRef, EngineError, EvalOptions, EvalStats, ExpressionEvaluator, Grid, Value,
};

/// Evaluate rows with the default Rhai evaluator and options.
pub fn evaluate_rows(rows: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
    Calculator::new().evaluate_rows(rows)
}

/// Evaluate rows using the given configuration.
pub fn evaluate_rows_with(rows: Vec<Vec<String>>, config: &Config) -> Result<Vec<Vec<String>>> {
    Calculator::from_config(config)?.evaluate_rows(rows)
}
