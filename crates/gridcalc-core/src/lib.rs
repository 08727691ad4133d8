//! gridcalc-core - Rhai expression evaluation and configuration for the
//! Gridcalc formula engine.

pub(crate) mod builtins;
pub mod config;
pub mod error;
pub mod eval;

pub use config::{Config, RhaiLimits};
pub use error::{CoreError, Result};
pub use eval::{RhaiEvaluator, create_engine, dynamic_to_value};

use gridcalc_engine::{CellRef, EvalOptions, EvalStats, Grid};

/// A configured evaluator plus evaluation options.
///
/// A `Calculator` holds no per-run state, so one instance can evaluate many
/// grids, including from several threads at once.
pub struct Calculator {
    evaluator: RhaiEvaluator,
    options: EvalOptions,
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator {
            evaluator: RhaiEvaluator::new(),
            options: EvalOptions::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Calculator> {
        let mut evaluator = RhaiEvaluator::with_limits(&config.rhai);
        if let Some(script) = config.functions_source()? {
            evaluator = evaluator.with_functions(&script)?;
        }
        Ok(Calculator {
            evaluator,
            options: config.evaluation.clone(),
        })
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Replace every formula in `grid` with its value.
    pub fn evaluate(&self, grid: &mut Grid) -> Result<EvalStats> {
        Ok(gridcalc_engine::evaluate_with(grid, &self.evaluator, &self.options)?)
    }

    /// Evaluate rows of cell text and return the evaluated rows.
    pub fn evaluate_rows(&self, rows: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
        let mut grid = Grid::new(rows);
        self.evaluate(&mut grid)?;
        Ok(grid.into_rows())
    }

    /// Resolve a single cell and the cells it depends on.
    pub fn evaluate_cell(&self, grid: &mut Grid, cell: &CellRef) -> Result<String> {
        Ok(gridcalc_engine::evaluate_cell(grid, &self.evaluator, &self.options, cell)?)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new()
    }
}
