//! Error types for the Gridcalc engine.

use thiserror::Error;

use crate::engine::CellRef;

/// Failure reported by an expression evaluator.
pub type EvaluatorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while evaluating a grid.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Circular reference detected at {0}")]
    CircularReference(CellRef),

    #[error("Error evaluating formula in cell {cell}: {source}")]
    Evaluation {
        cell: CellRef,
        #[source]
        source: EvaluatorError,
    },

    #[error("Dependency chain too deep at {cell} (limit {limit})")]
    DependencyTooDeep { cell: CellRef, limit: usize },

    #[error("Cell {0} is outside the grid")]
    OutOfBounds(CellRef),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

impl EngineError {
    /// The cell this error is about, when there is one.
    pub fn cell(&self) -> Option<CellRef> {
        match self {
            EngineError::CircularReference(cell)
            | EngineError::Evaluation { cell, .. }
            | EngineError::DependencyTooDeep { cell, .. }
            | EngineError::OutOfBounds(cell) => Some(*cell),
            EngineError::InvalidAddress(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
