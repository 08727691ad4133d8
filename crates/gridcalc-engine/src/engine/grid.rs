//! Grid storage for raw cell text.
//!
//! A [`Grid`] is an ordered list of rows, each an ordered list of cell strings.
//! Rows may have different lengths; reading past the end of a row (or the
//! last row) yields `None` instead of failing.

use super::cell_ref::CellRef;
use crate::error::{EngineError, Result};

/// A two-dimensional, possibly ragged, grid of cell strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Grid {
        Grid { rows }
    }

    /// Build a grid from anything that looks like rows of strings.
    pub fn from_rows<R, C, S>(rows: R) -> Grid
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Grid {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the given row, 0 when the row does not exist.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.col < self.row_len(cell.row)
    }

    pub fn get(&self, cell: &CellRef) -> Option<&str> {
        self.rows
            .get(cell.row)
            .and_then(|row| row.get(cell.col))
            .map(String::as_str)
    }

    /// Overwrite an existing cell. Writes never grow the grid.
    pub fn set(&mut self, cell: &CellRef, value: impl Into<String>) -> Result<()> {
        let slot = self
            .rows
            .get_mut(cell.row)
            .and_then(|row| row.get_mut(cell.col))
            .ok_or(EngineError::OutOfBounds(*cell))?;
        *slot = value.into();
        Ok(())
    }

    pub fn get_address(&self, address: &str) -> Option<&str> {
        self.get(&CellRef::from_str(address)?)
    }

    pub fn set_address(&mut self, address: &str, value: impl Into<String>) -> Result<()> {
        let cell = CellRef::from_str(address)
            .ok_or_else(|| EngineError::InvalidAddress(address.to_string()))?;
        self.set(&cell, value)
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &str)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, text)| (CellRef::new(r, c), text.as_str()))
        })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Grid {
        Grid::new(rows)
    }
}
