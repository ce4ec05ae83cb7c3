use std::collections::VecDeque;

use itertools::Itertools;
use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::QueryError;
use crate::grid::VACANT;
use crate::path::Path;
use crate::view::GridView;

/// Search for every path of minimum total weight between a view's source and destination.
///
/// A cell's value is its weight, and any cell may be stepped on, vacant ones included.
/// The weight of a path is the sum over all of its cells, endpoints included.
///
/// # Complexity
/// This enumerates *every* simple path from source to destination before scoring any of them.
/// The number of such paths grows exponentially with the number of cells, and the breadth-first
/// queue holds every partial path at once. It is meant for small grids (a handful of rows and
/// columns); dense grids much beyond 3x4 will exhaust time and memory.
pub struct LightestPathSearch<'g> {
    view: GridView<'g>,
}

impl<'g> From<GridView<'g>> for LightestPathSearch<'g> {
    fn from(view: GridView<'g>) -> Self {
        Self { view }
    }
}

impl LightestPathSearch<'_> {
    /// Enumerate all simple paths from source to destination in breadth-first order.
    pub fn all_paths(&self) -> Result<Vec<Path>, QueryError> {
        let source = self.view.source();
        let destination = self.view.destination()?;

        let mut paths = Vec::new();
        let mut queue = VecDeque::from([Path::singleton(source)]);

        while let Some(path) = queue.pop_front() {
            let Some(last) = path.last() else {
                continue;
            };

            // no simple path can leave the destination and come back to it
            if last == destination {
                paths.push(path);
                continue;
            }

            for next in self.view.neighbors(last) {
                if !path.contains(&next) {
                    queue.push_back(path.extended(next));
                }
            }
        }

        Ok(paths)
    }

    /// Score every enumerated path on `pool` and keep all of those tied at the minimum weight.
    ///
    /// Empty when either endpoint is vacant.
    pub fn run(&self, pool: &ThreadPool) -> Result<Vec<Path>, QueryError> {
        let source = self.view.source();
        let destination = self.view.destination()?;

        if self.view.value(source)? == VACANT || self.view.value(destination)? == VACANT {
            return Ok(Vec::new());
        }

        let candidates = self.all_paths()?;
        let grid = self.view.grid();
        let weights = pool.install(|| {
            candidates.par_iter()
                .map(|path| path.weight(grid))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let Some(lightest) = weights.iter().min().copied() else {
            return Ok(Vec::new());
        };
        log::debug!("{} candidate paths from {} to {}, lightest weighs {}", candidates.len(), source, destination, lightest);

        Ok(candidates.into_iter()
            .zip(weights)
            .filter(|(_, weight)| *weight == lightest)
            .map(|(path, _)| path)
            .collect_vec())
    }
}
