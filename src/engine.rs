use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::component::{Component, ComponentSearch};
use crate::config::EngineConfig;
use crate::error::QueryError;
use crate::grid::Grid;
use crate::index::CellIndex;
use crate::path::Path;
use crate::search::ShortestPathSearch;
use crate::submarine;
use crate::view::GridView;
use crate::weighted::LightestPathSearch;

/// Entry point for the four grid queries.
///
/// Each call is a self-contained fan-out/fan-in: a worker pool is built for the query, every task is joined,
/// and the pool is dropped before the call returns. Nothing is carried over from one query to the next.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// An engine building pools as described by `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn pool(&self) -> Result<ThreadPool, QueryError> {
        Ok(ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .thread_name(|i| format!("sonar-worker-{i}"))
            .build()?)
    }

    /// The distinct connected components of occupied cells, smallest first.
    pub fn components(&self, grid: &Grid) -> Result<Vec<Component>, QueryError> {
        let search = ComponentSearch::from(grid);
        log::debug!("exploring {} seeds on {} workers", search.seeds().len(), self.config.worker_count());

        search.run(&self.pool()?)
    }

    /// Every minimum-length path over occupied cells from `source` to `destination`.
    pub fn shortest_paths(&self, grid: &Grid, source: CellIndex, destination: CellIndex) -> Result<Vec<Path>, QueryError> {
        ShortestPathSearch::from(GridView::with_endpoints(grid, source, destination)?).run()
    }

    /// How many components of `grid` completely fill their bounding rectangle.
    pub fn count_submarines(&self, grid: &Grid) -> Result<usize, QueryError> {
        let components = self.components(grid)?;
        let count = submarine::count_submarines(&components, grid)?;
        log::debug!("{} of {} components are submarines", count, components.len());

        Ok(count)
    }

    /// Every path of minimum total weight from `source` to `destination`.
    ///
    /// Exhaustive; see [`LightestPathSearch`] for the cost on larger grids.
    pub fn lightest_paths(&self, grid: &Grid, source: CellIndex, destination: CellIndex) -> Result<Vec<Path>, QueryError> {
        LightestPathSearch::from(GridView::with_endpoints(grid, source, destination)?).run(&self.pool()?)
    }
}
