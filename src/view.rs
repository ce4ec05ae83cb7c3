use std::fmt::{Display, Formatter};

use crate::error::QueryError;
use crate::grid::Grid;
use crate::index::{CellIndex, Value};

/// A graph-shaped view over a [`Grid`] with a source and, optionally, a destination.
///
/// Both endpoints are bounds checked when assigned.
/// A view borrows its grid and is cheap to build, so concurrent tasks each build their own instead of sharing one.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'g> {
    grid: &'g Grid,
    source: CellIndex,
    destination: Option<CellIndex>,
}

impl<'g> GridView<'g> {
    /// A view rooted at the top left corner, which every grid has.
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            source: CellIndex(0, 0),
            destination: None,
        }
    }

    /// A view rooted at `source`, with no destination.
    pub fn with_source(grid: &'g Grid, source: CellIndex) -> Result<Self, QueryError> {
        Ok(Self {
            grid,
            source: grid.check(source)?,
            destination: None,
        })
    }

    /// A view with both endpoints set.
    pub fn with_endpoints(grid: &'g Grid, source: CellIndex, destination: CellIndex) -> Result<Self, QueryError> {
        let mut view = Self::with_source(grid, source)?;
        view.set_destination(destination)?;
        Ok(view)
    }

    /// The grid this view borrows.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// The source index.
    #[inline]
    pub fn source(&self) -> CellIndex {
        self.source
    }

    /// Move the source. Out-of-bounds indices are rejected and leave the view unchanged.
    pub fn set_source(&mut self, source: CellIndex) -> Result<&mut Self, QueryError> {
        self.source = self.grid.check(source)?;
        Ok(self)
    }

    /// The destination, which must have been set first.
    pub fn destination(&self) -> Result<CellIndex, QueryError> {
        self.destination.ok_or(QueryError::DestinationUnset)
    }

    /// Move the destination. Out-of-bounds indices are rejected and leave the view unchanged.
    pub fn set_destination(&mut self, destination: CellIndex) -> Result<&mut Self, QueryError> {
        self.destination = Some(self.grid.check(destination)?);
        Ok(self)
    }

    /// The root node of any walk over this view, i.e. the source.
    #[inline]
    pub fn root(&self) -> CellIndex {
        self.source
    }

    /// Every in-bounds neighbor of `node`, whatever its value. Used by weighted searches.
    pub fn neighbors(&self, node: CellIndex) -> Vec<CellIndex> {
        self.grid.neighbors(node)
    }

    /// `node` and its occupied neighbors, or nothing if `node` is vacant. Used by connectivity searches.
    pub fn reachable(&self, node: CellIndex) -> Result<Vec<CellIndex>, QueryError> {
        self.grid.reachable_from(node)
    }

    /// The value at `node`.
    pub fn value(&self, node: CellIndex) -> Result<Value, QueryError> {
        self.grid.value_at(node)
    }
}

impl Display for GridView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Source: {}", self.source)?;
        if let Some(destination) = self.destination {
            writeln!(f, "Destination: {}", destination)?;
        }
        write!(f, "Grid:\n{}", self.grid)
    }
}
