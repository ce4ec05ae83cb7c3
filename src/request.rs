//! Decoded requests and their results, as exchanged with a remote caller.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::component::Component;
use crate::engine::Engine;
use crate::error::QueryError;
use crate::grid::Grid;
use crate::index::{CellIndex, Value};
use crate::path::Path;

/// The name of a query, as it appears on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    /// Connected components of occupied cells.
    Components,
    /// All shortest paths over occupied cells.
    ShortestPath,
    /// The submarine count.
    CountShapes,
    /// All lightest paths over weighted cells.
    LightestPath,
}

/// One query, carrying its own grid as plain rows.
///
/// Rows are only checked when the request is handled, so a ragged grid is answered with
/// [`QueryError::Malformed`] rather than failing to decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum Request {
    /// Find every component of `grid`.
    Components {
        /// Rows of 0/1 cells.
        grid: Vec<Vec<Value>>,
    },
    /// Find every shortest path over occupied cells.
    ShortestPath {
        /// Rows of 0/1 cells.
        grid: Vec<Vec<Value>>,
        /// Where paths start.
        source: CellIndex,
        /// Where paths end.
        destination: CellIndex,
    },
    /// Count the submarines of `grid`.
    CountShapes {
        /// Rows of 0/1 cells.
        grid: Vec<Vec<Value>>,
    },
    /// Find every lightest path, reading each cell as a weight.
    LightestPath {
        /// Rows of weights.
        grid: Vec<Vec<Value>>,
        /// Where paths start.
        source: CellIndex,
        /// Where paths end.
        destination: CellIndex,
    },
}

impl Request {
    /// Which query this is.
    pub fn operation(&self) -> Operation {
        match self {
            Self::Components { .. } => Operation::Components,
            Self::ShortestPath { .. } => Operation::ShortestPath,
            Self::CountShapes { .. } => Operation::CountShapes,
            Self::LightestPath { .. } => Operation::LightestPath,
        }
    }

    /// The unchecked rows of the request's grid.
    pub fn rows(&self) -> &[Vec<Value>] {
        match self {
            Self::Components { grid }
            | Self::ShortestPath { grid, .. }
            | Self::CountShapes { grid }
            | Self::LightestPath { grid, .. } => grid,
        }
    }
}

/// The result of a [`Request`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Response {
    /// Distinct components, smallest first.
    Components(Vec<Component>),
    /// Paths tied at the best score.
    Paths(Vec<Path>),
    /// A count of submarines.
    Count(usize),
}

impl Engine {
    /// Run a decoded request.
    ///
    /// The grid is built first and fails with [`QueryError::Malformed`] if its rows are empty or ragged.
    /// Path endpoints are then bounds checked against it before any search starts.
    pub fn handle(&self, request: &Request) -> Result<Response, QueryError> {
        let grid = Grid::from_rows(request.rows())?;
        log::info!("handling {} on a {}x{} grid", request.operation(), grid.rows(), grid.columns());

        match *request {
            Request::Components { .. } => self.components(&grid).map(Response::Components),
            Request::ShortestPath { source, destination, .. } => {
                grid.check(source)?;
                grid.check(destination)?;
                self.shortest_paths(&grid, source, destination).map(Response::Paths)
            }
            Request::CountShapes { .. } => self.count_submarines(&grid).map(Response::Count),
            Request::LightestPath { source, destination, .. } => {
                grid.check(source)?;
                grid.check(destination)?;
                self.lightest_paths(&grid, source, destination).map(Response::Paths)
            }
        }
    }
}
