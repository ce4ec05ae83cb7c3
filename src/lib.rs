#![warn(missing_docs)]

//! # `sonar`
//!
//! Concurrent graph queries over small occupancy grids.
//! A [`Grid`] holds integer cells: 0 is vacant, 1 is occupied, and for weighted queries any value is a weight.
//! Cells are adjacent in all eight directions.
//!
//! Four queries are offered through an [`Engine`]:
//! 1. [`components`](Engine::components): the connected groups of occupied cells, smallest first.
//! 2. [`shortest_paths`](Engine::shortest_paths): every minimum-length path over occupied cells between two cells.
//! 3. [`count_submarines`](Engine::count_submarines): how many components completely fill their bounding rectangle.
//! 4. [`lightest_paths`](Engine::lightest_paths): every path of minimum summed cell value between two cells.
//!
//! Requests can also arrive already decoded as a [`Request`] and be answered with [`Engine::handle`].
//!
//! # Internals
//! Component discovery launches one depth-first [`Exploration`] per occupied cell on a worker pool built for that query.
//! Each task receives the shared, immutable grid plus its own seed, so no task ever writes anything another can see.
//! Many tasks land in the same component; their results collapse into one when the batch is merged.
//!
//! Both path queries run breadth-first over whole partial paths, so every result tied at the best score is found in one pass.
//! The weighted query is deliberately exhaustive: it enumerates every simple path before scoring them in parallel.
//! It is only practical on small grids; see [`LightestPathSearch`].

pub use component::{Bounds, Component, ComponentSearch, Exploration, ExplorationState};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{MalformedGrid, QueryError};
pub use grid::{Grid, OCCUPIED, VACANT};
pub use index::{CellIndex, Coord, Value, Weight};
pub use path::Path;
pub use request::{Operation, Request, Response};
pub use search::ShortestPathSearch;
pub use step::Step;
pub use view::GridView;
pub use weighted::LightestPathSearch;

pub(crate) mod component;
pub mod config;
pub(crate) mod engine;
pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod index;
pub(crate) mod path;
pub mod request;
pub(crate) mod search;
pub(crate) mod step;
pub mod submarine;
mod tests;
pub(crate) mod view;
pub(crate) mod weighted;
