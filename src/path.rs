use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::grid::Grid;
use crate::index::{CellIndex, Weight};
use crate::step::Step;

/// An ordered walk of cells from a source to the cell last appended, both inclusive.
///
/// Searches extend paths by copying them, so every partial path owns its whole prefix
/// and results never have to be reconstructed from predecessor links.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<CellIndex>);

impl Path {
    /// The one-cell path holding only `index`.
    pub fn singleton(index: CellIndex) -> Self {
        Self(vec![index])
    }

    /// A copy of this path with `next` appended.
    pub fn extended(&self, next: CellIndex) -> Self {
        let mut cells = Vec::with_capacity(self.0.len() + 1);
        cells.extend_from_slice(&self.0);
        cells.push(next);
        Self(cells)
    }

    /// The first cell.
    pub fn source(&self) -> Option<CellIndex> {
        self.0.first().copied()
    }

    /// The most recently appended cell.
    pub fn last(&self) -> Option<CellIndex> {
        self.0.last().copied()
    }

    /// Whether the path already visits `index`.
    #[inline]
    pub fn contains(&self, index: &CellIndex) -> bool {
        self.0.contains(index)
    }

    /// Number of cells on the path, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Only a path built from an empty vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cells from source to last.
    #[inline]
    pub fn cells(&self) -> &[CellIndex] {
        &self.0
    }

    /// Sum of the values of every cell on the path, source and destination included.
    pub fn weight(&self, grid: &Grid) -> Result<Weight, QueryError> {
        self.0.iter().try_fold(0, |acc: Weight, index| {
            Ok::<_, QueryError>(acc + Weight::from(grid.value_at(*index)?))
        })
    }

    /// True when no cell appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().all(|index| seen.insert(*index))
    }

    /// True when every consecutive pair of cells is 8-directionally adjacent.
    pub fn is_connected(&self) -> bool {
        self.0.iter()
            .tuple_windows()
            .all(|(a, b)| Step::between(*a, *b).is_some())
    }
}

impl From<Vec<CellIndex>> for Path {
    fn from(value: Vec<CellIndex>) -> Self {
        Self(value)
    }
}

impl From<Path> for Vec<CellIndex> {
    fn from(value: Path) -> Self {
        value.0
    }
}

impl IntoIterator for Path {
    type Item = CellIndex;
    type IntoIter = std::vec::IntoIter<CellIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a CellIndex;
    type IntoIter = std::slice::Iter<'a, CellIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" -> "))
    }
}
