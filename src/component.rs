use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::grid::Grid;
use crate::index::{CellIndex, Coord};
use crate::view::GridView;

/// A set of occupied cells, all reachable from one another through 8-directional adjacency.
///
/// Components order by size first, then by their cells, so sorting a batch of them is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(BTreeSet<CellIndex>);

/// An axis-aligned rectangle of cells, inclusive on all sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// First row.
    pub top: Coord,
    /// First column.
    pub left: Coord,
    /// Last row.
    pub bottom: Coord,
    /// Last column.
    pub right: Coord,
}

impl Bounds {
    /// Every index inside the rectangle in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        (self.top..=self.bottom)
            .cartesian_product(self.left..=self.right)
            .map(|(row, column)| CellIndex(row, column))
    }

    /// Number of cells inside the rectangle.
    pub fn area(&self) -> usize {
        (self.bottom - self.top + 1) * (self.right - self.left + 1)
    }
}

impl Component {
    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a component with no cells, which discovery never produces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `index` belongs to this component.
    #[inline]
    pub fn contains(&self, index: &CellIndex) -> bool {
        self.0.contains(index)
    }

    /// The cells in `(row, column)` order.
    pub fn cells(&self) -> impl Iterator<Item = &CellIndex> {
        self.0.iter()
    }

    /// The smallest rectangle holding every cell, or [`None`] for an empty component.
    pub fn bounds(&self) -> Option<Bounds> {
        let (top, bottom) = self.0.iter().map(CellIndex::row).minmax().into_option()?;
        let (left, right) = self.0.iter().map(CellIndex::column).minmax().into_option()?;

        Some(Bounds { top, left, bottom, right })
    }
}

impl FromIterator<CellIndex> for Component {
    fn from_iter<T: IntoIterator<Item = CellIndex>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len()).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lifecycle of a single depth-first exploration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExplorationState {
    /// Built, nothing pushed yet.
    Idle,
    /// The frontier has been seeded and is being drained.
    Exploring,
    /// The frontier is exhausted; the visited set is the component.
    Done,
}

/// An iterative depth-first walk over the occupied cells reachable from a view's root.
///
/// The frontier and visited set are private to the walk, so any number of explorations may run at once over one grid.
pub struct Exploration<'g> {
    view: GridView<'g>,
    state: ExplorationState,
    frontier: Vec<CellIndex>,
    queued: HashSet<CellIndex>,
    visited: HashSet<CellIndex>,
}

impl<'g> Exploration<'g> {
    /// An idle exploration rooted at the view's source.
    pub fn new(view: GridView<'g>) -> Self {
        Self {
            view,
            state: ExplorationState::Idle,
            frontier: Vec::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Where this exploration is in its lifecycle.
    #[inline]
    pub fn state(&self) -> ExplorationState {
        self.state
    }

    /// Advance by one unit of work: seeding the frontier, or popping and expanding one node.
    pub fn step(&mut self) -> Result<ExplorationState, QueryError> {
        match self.state {
            ExplorationState::Idle => {
                let root = self.view.root();
                self.frontier.push(root);
                self.queued.insert(root);
                self.state = ExplorationState::Exploring;
            }
            ExplorationState::Exploring => match self.frontier.pop() {
                Some(node) => {
                    self.queued.remove(&node);
                    self.visited.insert(node);

                    for next in self.view.reachable(node)? {
                        if !self.visited.contains(&next) && !self.queued.contains(&next) {
                            self.queued.insert(next);
                            self.frontier.push(next);
                        }
                    }
                }
                None => self.state = ExplorationState::Done,
            },
            ExplorationState::Done => {}
        }

        Ok(self.state)
    }

    /// Step until [`ExplorationState::Done`] and return the visited cells.
    pub fn run(mut self) -> Result<Component, QueryError> {
        while self.step()? != ExplorationState::Done {}
        Ok(self.into_component())
    }

    /// The cells visited so far.
    pub fn into_component(self) -> Component {
        self.visited.into_iter().collect()
    }
}

/// Parallel connected-component discovery over every occupied cell of a [`Grid`].
///
/// One exploration is launched per occupied cell. Explorations starting in the same component find the same set,
/// and those duplicates collapse when the batch is merged.
pub struct ComponentSearch<'g> {
    grid: &'g Grid,
    seeds: Vec<CellIndex>,
}

impl<'g> From<&'g Grid> for ComponentSearch<'g> {
    fn from(grid: &'g Grid) -> Self {
        Self {
            grid,
            seeds: grid.occupied_indices(),
        }
    }
}

impl<'g> ComponentSearch<'g> {
    /// Explore the component containing `seed`.
    ///
    /// Each call gets its own `(grid, seed)` pair and its own view; nothing is shared with other calls but the grid.
    pub fn explore(grid: &'g Grid, seed: CellIndex) -> Result<Component, QueryError> {
        let component = Exploration::new(GridView::with_source(grid, seed)?).run()?;
        log::trace!("exploration from {} reached {} cells", seed, component.len());
        Ok(component)
    }

    /// The cells explorations will be seeded at, in row-major order.
    pub fn seeds(&self) -> &[CellIndex] {
        &self.seeds
    }

    /// Run every exploration on `pool` and return the distinct components, smallest first.
    ///
    /// The first failing exploration fails the whole batch; no partial result is returned.
    pub fn run(&self, pool: &ThreadPool) -> Result<Vec<Component>, QueryError> {
        let grid = self.grid;
        let discovered = pool.install(|| {
            self.seeds.par_iter()
                .map(|&seed| Self::explore(grid, seed))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let components = discovered.into_iter()
            .unique()
            .sorted()
            .collect_vec();
        log::debug!("{} seeds merged into {} components", self.seeds.len(), components.len());

        Ok(components)
    }
}
