use std::collections::VecDeque;

use crate::component::Exploration;
use crate::error::QueryError;
use crate::grid::VACANT;
use crate::path::Path;
use crate::view::GridView;

/// Breadth-first search for every minimum-length path between a view's source and destination.
///
/// The queue holds whole partial paths rather than bare cells, so all paths tied at the minimum length come out of one pass.
/// Only occupied cells are traversed, and no path visits a cell twice.
pub struct ShortestPathSearch<'g> {
    view: GridView<'g>,
}

impl<'g> From<GridView<'g>> for ShortestPathSearch<'g> {
    fn from(view: GridView<'g>) -> Self {
        Self { view }
    }
}

impl ShortestPathSearch<'_> {
    /// Find all shortest paths, in discovery order.
    ///
    /// Empty when either endpoint is vacant or the destination cannot be reached through occupied cells.
    /// Cells holding anything other than [`OCCUPIED`](crate::OCCUPIED) are never stepped through, so a path only starts or ends on one
    /// when source and destination coincide.
    /// Fails with [`QueryError::DestinationUnset`] if the view has no destination.
    pub fn run(&self) -> Result<Vec<Path>, QueryError> {
        let source = self.view.source();
        let destination = self.view.destination()?;

        if self.view.value(source)? == VACANT || self.view.value(destination)? == VACANT {
            return Ok(Vec::new());
        }
        if source == destination {
            return Ok(vec![Path::singleton(source)]);
        }
        // the path queue grows with every simple path in the component, so skip it outright when it cannot finish
        if !Exploration::new(self.view).run()?.contains(&destination) {
            log::debug!("{} is not reachable from {}", destination, source);
            return Ok(Vec::new());
        }

        let mut shortest = Vec::new();
        let mut best: Option<usize> = None;
        let mut queue = VecDeque::from([Path::singleton(source)]);

        while let Some(path) = queue.pop_front() {
            // FIFO order dequeues every path of one length before any longer one
            if best.is_some_and(|len| path.len() > len) {
                break;
            }

            let Some(last) = path.last() else {
                continue;
            };

            if last == destination {
                best = Some(path.len());
                shortest.push(path);
                continue;
            }
            if best == Some(path.len()) {
                continue;
            }

            for next in self.view.reachable(last)? {
                if !path.contains(&next) {
                    queue.push_back(path.extended(next));
                }
            }
        }

        log::debug!("found {} shortest paths from {} to {}", shortest.len(), source, destination);
        Ok(shortest)
    }
}
