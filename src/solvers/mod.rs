use std::fmt;

mod bfs;

pub use bfs::solve_bfs;

use thiserror::Error;

use crate::maze::{Coord, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The carved grid has no route between the doorways. A generator that
    /// produces this has a bug; the solver's job is only to detect it.
    #[error("no route from entry {entry:?} to exit {exit:?}")]
    Unreachable { entry: Coord, exit: Coord },
    /// The predecessor chain produced a displacement that is not a unit
    /// cardinal step, which means the grid or the chain is corrupt.
    #[error("predecessor chain steps from {from:?} to {to:?}, not a unit move")]
    CorruptStep { from: Coord, to: Coord },
}

/// The route from entry to exit as unit cardinal steps. Immutable once the
/// solver returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionPath {
    steps: Vec<Direction>,
}

impl SolutionPath {
    pub(crate) fn new(steps: Vec<Direction>) -> Self {
        SolutionPath { steps }
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every lattice cell the route touches, starting at `from`.
    pub fn walk(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        let mut pos = Some(from);
        let mut steps = self.steps.iter();
        std::iter::from_fn(move || {
            let current = pos?;
            pos = steps.next().and_then(|dir| dir.step(current));
            Some(current)
        })
    }
}

impl fmt::Display for SolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dir in &self.steps {
            fmt::Write::write_char(f, dir.as_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_traces_the_route_from_the_start() {
        let path = SolutionPath::new(vec![
            Direction::East,
            Direction::East,
            Direction::South,
        ]);
        let cells: Vec<_> = path.walk((1, 1)).collect();
        assert_eq!(cells, vec![(1, 1), (2, 1), (3, 1), (3, 2)]);
        assert_eq!(path.to_string(), "EES");
    }
}
