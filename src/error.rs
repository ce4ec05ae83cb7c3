use std::fmt::{Display, Formatter};

use crate::index::CellIndex;

/// Reasons a grid may be rejected while it is being built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MalformedGrid {
    /// The input had no rows at all.
    NoRows,
    /// The first row was empty, so the grid has no columns.
    NoColumns,
    /// A row's length differed from the first row's, i.e. the input was not rectangular.
    Ragged {
        /// The offending row.
        row: usize,
        /// The length of the first row.
        expected: usize,
        /// The length actually found.
        found: usize,
    },
}

impl Display for MalformedGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRows => f.write_str("grid has no rows"),
            Self::NoColumns => f.write_str("grid has no columns"),
            Self::Ragged { row, expected, found } => {
                write!(f, "grid is not rectangular: row {row} has {found} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for MalformedGrid {}

/// Reasons a query may fail.
///
/// All of these are deterministic functions of the input; retrying the same query fails the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// An index fell outside the grid.
    OutOfBounds {
        /// The rejected index.
        index: CellIndex,
        /// Row count of the grid it was checked against.
        rows: usize,
        /// Column count of the grid it was checked against.
        columns: usize,
    },
    /// A destination was read from a [`GridView`](crate::GridView) before one was set.
    DestinationUnset,
    /// The grid itself could not be built.
    Malformed(MalformedGrid),
    /// The per-query worker pool could not be started.
    WorkerPool(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { index, rows, columns } => {
                write!(f, "index {index} is out of bounds for a {rows}x{columns} grid")
            }
            Self::DestinationUnset => f.write_str("destination index is not set"),
            Self::Malformed(reason) => write!(f, "malformed grid: {reason}"),
            Self::WorkerPool(reason) => write!(f, "could not start worker pool: {reason}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<MalformedGrid> for QueryError {
    fn from(value: MalformedGrid) -> Self {
        Self::Malformed(value)
    }
}

impl From<rayon::ThreadPoolBuildError> for QueryError {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        Self::WorkerPool(value.to_string())
    }
}
