use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::error::{MalformedGrid, QueryError};
use crate::index::{CellIndex, Value};
use crate::step::Step;

/// Cell value marking a vacant cell.
pub const VACANT: Value = 0;
/// Cell value marking an occupied cell, the only value connectivity queries may traverse.
pub const OCCUPIED: Value = 1;

/// An immutable, rectangular grid of cell values.
///
/// The grid owns its storage; building one copies the caller's rows, so later changes to those rows never reach a query in flight.
/// Grids are shared read-only by every worker of a query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Value>,
}

impl Grid {
    /// Build a grid from a slice of rows, copying every value.
    ///
    /// Fails with a [`MalformedGrid`] reason if there are no rows, no columns, or rows of differing lengths.
    pub fn from_rows<R: AsRef<[Value]>>(rows: &[R]) -> Result<Self, MalformedGrid> {
        let expected = rows.first().ok_or(MalformedGrid::NoRows)?.as_ref().len();
        if expected == 0 {
            return Err(MalformedGrid::NoColumns);
        }

        if let Some((row, found)) = rows.iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|(_, len)| *len != expected) {
            return Err(MalformedGrid::Ragged { row, expected, found });
        }

        Ok(Self {
            cells: Array2::from_shape_fn((rows.len(), expected), |(r, c)| rows[r].as_ref()[c]),
        })
    }

    /// Number of rows, never zero.
    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns, never zero.
    #[inline]
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// Whether `index` lies on this grid.
    #[inline]
    pub fn contains(&self, index: CellIndex) -> bool {
        index.row() < self.rows() && index.column() < self.columns()
    }

    /// Fail with [`QueryError::OutOfBounds`] unless `index` lies on this grid.
    pub fn check(&self, index: CellIndex) -> Result<CellIndex, QueryError> {
        if self.contains(index) {
            Ok(index)
        } else {
            Err(QueryError::OutOfBounds { index, rows: self.rows(), columns: self.columns() })
        }
    }

    /// The value at `index`.
    pub fn value_at(&self, index: CellIndex) -> Result<Value, QueryError> {
        self.cells.get(index.as_index())
            .copied()
            .ok_or(QueryError::OutOfBounds { index, rows: self.rows(), columns: self.columns() })
    }

    /// The up to eight in-bounds neighbors of `index`, regardless of their values, in [`Step::VARIANTS`] order.
    ///
    /// Cells on an edge or corner simply have fewer neighbors.
    pub fn neighbors(&self, index: CellIndex) -> Vec<CellIndex> {
        Step::VARIANTS.iter()
            .map(|step| step.attempt_from(index))
            .filter(|neighbor| self.contains(*neighbor))
            .collect_vec()
    }

    /// Every index holding [`OCCUPIED`], in row-major order.
    pub fn occupied_indices(&self) -> Vec<CellIndex> {
        self.cells.indexed_iter()
            .filter(|(_, value)| **value == OCCUPIED)
            .map(|(ind, _)| CellIndex::from(ind))
            .collect_vec()
    }

    /// The traversal primitive for connectivity queries.
    ///
    /// Empty unless `index` holds exactly [`OCCUPIED`]. Otherwise `index` itself followed by each neighbor holding [`OCCUPIED`].
    /// Weights and other values are never traversed.
    pub fn reachable_from(&self, index: CellIndex) -> Result<Vec<CellIndex>, QueryError> {
        if self.value_at(index)? != OCCUPIED {
            return Ok(Vec::new());
        }

        let mut reachable = Vec::with_capacity(Step::VARIANTS.len() + 1);
        reachable.push(index);
        reachable.extend(self.neighbors(index)
            .into_iter()
            .filter(|neighbor| self.cells[neighbor.as_index()] == OCCUPIED));

        Ok(reachable)
    }

    /// Every index of the grid in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.indexed_iter().map(|(ind, _)| CellIndex::from(ind))
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            writeln!(f, "[{}]", row.iter().join(", "))?;
        }

        Ok(())
    }
}
