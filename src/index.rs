use std::fmt::{Display, Formatter};

use ndarray::Ix;
use serde::{Deserialize, Serialize};

/// A row or column number.
pub type Coord = usize;
/// The value held by a single cell: 0 for vacant, 1 for occupied, or an arbitrary weight.
pub type Value = i32;
/// The summed weight of a path. Wider than [`Value`] so long paths of heavy cells cannot overflow.
pub type Weight = i64;

/// A location `(row, column)` on a grid. The top left corner is `CellIndex(0, 0)`.
///
/// Ordering is lexicographic by row, then column.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct CellIndex(pub Coord, pub Coord);

impl CellIndex {
    /// The row, counted from the top.
    #[inline]
    pub fn row(&self) -> Coord {
        self.0
    }

    /// The column, counted from the left.
    #[inline]
    pub fn column(&self) -> Coord {
        self.1
    }

    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    // stepping off the top or left edge wraps to a huge coordinate, which no grid contains
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for CellIndex {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for CellIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
