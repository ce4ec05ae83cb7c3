//! Recognizing "submarines": components that fill their bounding rectangle.

use itertools::Itertools;

use crate::component::Component;
use crate::error::QueryError;
use crate::grid::{Grid, VACANT};

/// Whether `component` is a submarine on `grid`.
///
/// A single cell never is. Otherwise every cell of the component's bounding rectangle must be non-vacant;
/// the component's exact outline does not matter beyond that.
pub fn is_submarine(component: &Component, grid: &Grid) -> Result<bool, QueryError> {
    if component.len() <= 1 {
        return Ok(false);
    }

    let Some(bounds) = component.bounds() else {
        return Ok(false);
    };

    for index in bounds.indices() {
        if grid.value_at(index)? == VACANT {
            return Ok(false);
        }
    }

    Ok(true)
}

/// The components that are submarines, in their original order.
pub fn submarines<'c>(components: &'c [Component], grid: &Grid) -> Result<Vec<&'c Component>, QueryError> {
    let mut accepted = Vec::with_capacity(components.len());
    for component in components {
        if is_submarine(component, grid)? {
            accepted.push(component);
        }
    }

    Ok(accepted)
}

/// How many of `components` are submarines.
pub fn count_submarines(components: &[Component], grid: &Grid) -> Result<usize, QueryError> {
    components.iter()
        .map(|component| is_submarine(component, grid))
        .fold_ok(0, |count, accepted| count + usize::from(accepted))
}
