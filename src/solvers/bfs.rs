use std::collections::{HashMap, HashSet, VecDeque};

use super::{SolutionPath, SolveError};
use crate::maze::{Coord, Direction, Maze};

/// Breadth-first search from entry to exit over the open cells of the
/// lattice. Neighbors are expanded in the fixed N, E, S, W order so the
/// recorded predecessor tree is deterministic; the shortest-path length does
/// not depend on that order.
pub fn solve_bfs(maze: &Maze) -> Result<SolutionPath, SolveError> {
    let entry = maze.entry();
    let exit = maze.exit();

    let mut queue = VecDeque::from([entry]);
    let mut visited = HashSet::from([entry]);
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();

    let mut reached = false;
    while let Some(current) = queue.pop_front() {
        if current == exit {
            reached = true;
            break;
        }
        for dir in Direction::ALL {
            let Some(next) = dir.step(current) else { continue };
            if !maze.in_bounds(next) || !maze[next].is_open() {
                continue;
            }
            if visited.insert(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }
    if !reached {
        return Err(SolveError::Unreachable { entry, exit });
    }

    // Walk the predecessor chain back from the exit and flip it around.
    let mut steps = Vec::new();
    let mut current = exit;
    while current != entry {
        let parent = came_from
            .get(&current)
            .copied()
            .ok_or(SolveError::CorruptStep {
                from: current,
                to: current,
            })?;
        let dir = Direction::between(parent, current).ok_or(SolveError::CorruptStep {
            from: parent,
            to: current,
        })?;
        steps.push(dir);
        current = parent;
    }
    steps.reverse();
    Ok(SolutionPath::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationRequest, Tuning};
    use crate::generators::Algorithm;

    fn fresh_maze() -> Maze {
        let request = GenerationRequest {
            width: 7,
            height: 7,
            entry: (1, 1),
            exit: (5, 5),
            perfect: true,
            algorithm: Algorithm::Prim,
            seed: Some(1),
            symbol: false,
            tuning: Tuning::default(),
        };
        Maze::new(&request).unwrap()
    }

    #[test]
    fn finds_the_shortest_route_along_a_corridor() {
        let mut maze = fresh_maze();
        maze.carve((1, 1), (3, 1));
        maze.carve((3, 1), (5, 1));
        maze.carve((5, 1), (5, 3));
        maze.carve((5, 3), (5, 5));
        // A longer detour that BFS must not prefer.
        maze.carve((1, 1), (1, 3));
        maze.carve((1, 3), (1, 5));
        maze.carve((1, 5), (3, 5));
        maze.carve((3, 5), (5, 5));

        let path = solve_bfs(&maze).unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.to_string(), "EEEESSSS");
        assert_eq!(path.walk((1, 1)).last(), Some((5, 5)));
    }

    #[test]
    fn reports_a_disconnected_grid_as_unreachable() {
        let maze = fresh_maze();
        assert_eq!(
            solve_bfs(&maze),
            Err(SolveError::Unreachable {
                entry: (1, 1),
                exit: (5, 5)
            })
        );
    }
}
