//! Memoized, depth-first evaluation of every formula in a grid.
//!
//! Each call to [`evaluate`] builds a fresh [`Evaluation`] holding the value
//! cache and the set of cells on the active resolution path. Formula cells are
//! resolved on demand: a reference to another formula recurses into it before
//! substitution, so traversal order never changes the result. A cell found on
//! its own resolution path is a circular reference.

use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::ops::{Deref, DerefMut};

use super::{CellRef, EvalOptions, ExpressionEvaluator, Grid};
use crate::error::{EngineError, Result};

/// Counters collected during one evaluation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Formulas handed to the expression evaluator.
    pub formulas: usize,
    /// References answered from the cache.
    pub cache_hits: usize,
}

/// Evaluate every formula in `grid` with default options.
pub fn evaluate<E>(grid: &mut Grid, evaluator: &E) -> Result<EvalStats>
where
    E: ExpressionEvaluator + ?Sized,
{
    evaluate_with(grid, evaluator, &EvalOptions::default())
}

/// Evaluate every formula in `grid`, replacing each with its computed value.
///
/// Fails fast on the first circular reference or evaluator failure. Cells
/// computed before the failure keep their new values.
pub fn evaluate_with<E>(grid: &mut Grid, evaluator: &E, options: &EvalOptions) -> Result<EvalStats>
where
    E: ExpressionEvaluator + ?Sized,
{
    Evaluation::new(grid, evaluator, options).run()
}

/// Resolve a single cell (and whatever it depends on) with fresh state.
pub fn evaluate_cell<E>(
    grid: &mut Grid,
    evaluator: &E,
    options: &EvalOptions,
    cell: &CellRef,
) -> Result<String>
where
    E: ExpressionEvaluator + ?Sized,
{
    if !grid.contains(cell) {
        return Err(EngineError::OutOfBounds(*cell));
    }
    Evaluation::new(grid, evaluator, options).resolve_cell(*cell)
}

/// State owned by a single evaluation run.
pub struct Evaluation<'a, E: ?Sized> {
    pub(super) grid: &'a mut Grid,
    evaluator: &'a E,
    pub(super) options: &'a EvalOptions,
    cache: HashMap<CellRef, String>,
    in_progress: HashSet<CellRef>,
    pub(super) stats: EvalStats,
}

impl<'a, E> Evaluation<'a, E>
where
    E: ExpressionEvaluator + ?Sized,
{
    pub fn new(grid: &'a mut Grid, evaluator: &'a E, options: &'a EvalOptions) -> Self {
        Evaluation {
            grid,
            evaluator,
            options,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
            stats: EvalStats::default(),
        }
    }

    /// Visit every cell in row-major order and resolve the formulas.
    pub fn run(mut self) -> Result<EvalStats> {
        let formulas: Vec<CellRef> = self
            .grid
            .cells()
            .filter(|(_, text)| self.options.is_formula(text))
            .map(|(cell, _)| cell)
            .collect();
        debug!(
            "evaluating {} formula cells across {} rows",
            formulas.len(),
            self.grid.row_count()
        );

        for cell in formulas {
            self.resolve_cell(cell)?;
        }

        debug!(
            "evaluation finished: {} formulas, {} cache hits",
            self.stats.formulas, self.stats.cache_hits
        );
        Ok(self.stats)
    }

    /// Resolve one cell to its final text.
    ///
    /// Literal cells resolve to their own text. Formula cells are evaluated at
    /// most once per run; later requests are answered from the cache.
    pub fn resolve_cell(&mut self, cell: CellRef) -> Result<String> {
        if let Some(value) = self.cache.get(&cell) {
            self.stats.cache_hits += 1;
            return Ok(value.clone());
        }
        if self.in_progress.contains(&cell) {
            return Err(EngineError::CircularReference(cell));
        }

        let Some(text) = self.grid.get(&cell) else {
            return Err(EngineError::OutOfBounds(cell));
        };
        let Some(body) = self.options.formula_body(text) else {
            return Ok(text.to_string());
        };
        let body = body.to_string();

        if self.in_progress.len() >= self.options.max_depth {
            return Err(EngineError::DependencyTooDeep {
                cell,
                limit: self.options.max_depth,
            });
        }

        let value = {
            let mut run = InProgress::enter(self, cell);
            let expression = run.substitute_references(&body)?;
            trace!("{} = {} -> {}", cell, body, expression);
            run.stats.formulas += 1;
            run.evaluator
                .evaluate(&expression)
                .map_err(|source| EngineError::Evaluation { cell, source })?
        };

        let result = value.to_string();
        trace!("{} resolved to {:?}", cell, result);
        self.cache.insert(cell, result.clone());
        self.grid.set(&cell, result.clone())?;
        Ok(result)
    }
}

/// Marks a cell as being resolved for as long as the guard lives.
struct InProgress<'r, 'a, E: ?Sized> {
    run: &'r mut Evaluation<'a, E>,
    cell: CellRef,
}

impl<'r, 'a, E: ?Sized> InProgress<'r, 'a, E> {
    fn enter(run: &'r mut Evaluation<'a, E>, cell: CellRef) -> Self {
        run.in_progress.insert(cell);
        InProgress { run, cell }
    }
}

impl<'a, E: ?Sized> Deref for InProgress<'_, 'a, E> {
    type Target = Evaluation<'a, E>;

    fn deref(&self) -> &Self::Target {
        self.run
    }
}

impl<E: ?Sized> DerefMut for InProgress<'_, '_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.run
    }
}

impl<E: ?Sized> Drop for InProgress<'_, '_, E> {
    fn drop(&mut self) {
        self.run.in_progress.remove(&self.cell);
    }
}
