//! The pluggable expression evaluator seam.
//!
//! The engine never parses expressions itself. Once every cell reference in a
//! formula has been replaced by a literal, the text is handed to an
//! [`ExpressionEvaluator`], which returns a single [`Value`] or a failure.

use super::Value;
use crate::error::EvaluatorError;

/// Computes the value of a fully substituted expression.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expression: &str) -> Result<Value, EvaluatorError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str) -> Result<Value, EvaluatorError>,
{
    fn evaluate(&self, expression: &str) -> Result<Value, EvaluatorError> {
        self(expression)
    }
}
