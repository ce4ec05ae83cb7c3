use strum::VariantArray;

use crate::index::CellIndex;

/// One of the eight directions a walk may take between adjacent cells.
///
/// [`Step::VARIANTS`] lists the diagonals first, then the four cardinal directions.
/// Every neighbor enumeration in this crate follows that order, which makes discovery order reproducible.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Step {
    /// One row up, one column left.
    UpLeft,
    /// One row down, one column right.
    DownRight,
    /// One row up, one column right.
    UpRight,
    /// One row down, one column left.
    DownLeft,
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Step {
    /// The `(row, column)` delta of this step.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::DownRight => (1, 1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Attempt the step from `index` in the direction specified by `self` and return the resultant [`CellIndex`].
    ///
    /// The result is not bounds checked; it may lie outside any grid.
    pub fn attempt_from(&self, index: CellIndex) -> CellIndex {
        index.offset_by(self.offset())
    }

    /// Invert the direction specified by `self`.
    pub fn invert(&self) -> Self {
        match self {
            Self::UpLeft => Self::DownRight,
            Self::DownRight => Self::UpLeft,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// Returns [`None`] if `a` and `b` are not 8-directionally adjacent.
    pub fn between(a: CellIndex, b: CellIndex) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
