//! Procedural maze generation, solving, and encoding.
//!
//! One call owns the whole pipeline: build an all-wall lattice, carve it with
//! one of three generators, repair stray isolated cells, solve it with BFS,
//! optionally punch a few loops near the route, and hand back a read-only
//! result ready for the text codec or the renderer.

pub mod codec;
pub mod config;
mod error;
pub mod generators;
pub mod maze;
pub mod postprocess;
pub mod render;
pub mod solvers;

pub use config::{Config, ConfigError, GenerationRequest, Tuning};
pub use error::Error;
pub use generators::Algorithm;
pub use maze::{Cell, Coord, Direction, Maze};
pub use solvers::{SolutionPath, SolveError};

use rand::{SeedableRng, rngs::StdRng};

/// A finished maze: read-only grid, doorways, shortest route, and the seed
/// that reproduces all of it.
#[derive(Debug)]
pub struct GeneratedMaze {
    maze: Maze,
    path: SolutionPath,
    seed: u64,
}

impl GeneratedMaze {
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn path(&self) -> &SolutionPath {
        &self.path
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn entry(&self) -> Coord {
        self.maze.entry()
    }

    pub fn exit(&self) -> Coord {
        self.maze.exit()
    }
}

/// Run the whole pipeline for one request. The grid lives exactly as long as
/// this call; every new maze re-seeds and rebuilds from scratch.
pub fn generate(request: &GenerationRequest) -> Result<GeneratedMaze, Error> {
    request.validate()?;

    let seed = generators::resolve_seed(request.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(
        seed,
        algorithm = %request.algorithm,
        width = request.width,
        height = request.height,
        "generating maze"
    );

    let mut maze = Maze::new(request)?;
    generators::carve_maze(&mut maze, request.algorithm, &request.tuning, &mut rng);
    maze.open_endpoints();
    maze.seal_borders();
    postprocess::repair(&mut maze);

    let path = solvers::solve_bfs(&maze).map_err(|source| Error::Generation {
        algorithm: request.algorithm,
        width: request.width,
        height: request.height,
        seed,
        source,
    })?;
    tracing::debug!(steps = path.len(), "solved");

    if !request.perfect {
        let target = request
            .tuning
            .loop_target
            .unwrap_or_else(|| postprocess::default_loop_target(request.width, request.height));
        let added = postprocess::inject_loops(&mut maze, &path, target, &mut rng);
        tracing::debug!(added, target, "injected loops");
    }

    Ok(GeneratedMaze { maze, path, seed })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALGORITHMS: [Algorithm; 3] =
        [Algorithm::Prim, Algorithm::Backtracker, Algorithm::Eller];

    /// The boundary request from the wire contract: 31x31, doorway corners,
    /// seed 42.
    fn boundary_request(algorithm: Algorithm) -> GenerationRequest {
        GenerationRequest {
            width: 31,
            height: 31,
            entry: (1, 1),
            exit: (29, 29),
            perfect: true,
            algorithm,
            seed: Some(42),
            symbol: false,
            tuning: Tuning::default(),
        }
    }

    /// Rooms reachable from the entry by walking open cells.
    fn reachable_rooms(maze: &Maze) -> usize {
        let mut seen = HashSet::from([maze.entry()]);
        let mut stack = vec![maze.entry()];
        while let Some(cell) = stack.pop() {
            for next in maze.unit_neighbors(cell) {
                if maze[next].is_open() && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        maze.rooms().filter(|c| seen.contains(c)).count()
    }

    /// A 2x2 square of rooms with all four connecting slots open reads as
    /// one big room; neither generation nor loop injection may produce it.
    fn has_open_block(maze: &Maze) -> bool {
        for y in (1..maze.height() - 2).step_by(2) {
            for x in (1..maze.width() - 2).step_by(2) {
                let slots = [(x + 1, y), (x + 1, y + 2), (x, y + 1), (x + 2, y + 1)];
                if slots.into_iter().all(|c| maze[c].is_open()) {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn perfect_mazes_are_spanning_trees() {
        for algorithm in ALGORITHMS {
            let generated = generate(&boundary_request(algorithm)).unwrap();
            let maze = generated.maze();

            let rooms = maze.rooms().count();
            assert_eq!(
                reachable_rooms(maze),
                rooms,
                "{algorithm} left rooms unreachable"
            );
            assert_eq!(
                maze.open_edge_count(),
                rooms - 1,
                "{algorithm} did not produce a spanning tree"
            );
        }
    }

    #[test]
    fn every_maze_is_solvable() {
        for algorithm in ALGORITHMS {
            for perfect in [true, false] {
                let mut request = boundary_request(algorithm);
                request.perfect = perfect;
                let generated = generate(&request).unwrap();
                let landing = generated.path().walk(generated.entry()).last();
                assert_eq!(landing, Some(generated.exit()));
            }
        }
    }

    #[test]
    fn identical_requests_produce_identical_mazes() {
        let a = generate(&boundary_request(Algorithm::Prim)).unwrap();
        let b = generate(&boundary_request(Algorithm::Prim)).unwrap();
        assert_eq!(a.maze(), b.maze());
        assert_eq!(a.path(), b.path());
        assert_eq!(codec::encode(&a), codec::encode(&b));
    }

    #[test]
    fn different_algorithms_produce_different_but_valid_mazes() {
        let prim = generate(&boundary_request(Algorithm::Prim)).unwrap();
        let eller = generate(&boundary_request(Algorithm::Eller)).unwrap();
        assert_ne!(codec::encode(&prim), codec::encode(&eller));
        assert_eq!(reachable_rooms(eller.maze()), eller.maze().rooms().count());
    }

    #[test]
    fn imperfect_mazes_gain_cycles_but_no_open_rooms() {
        for algorithm in ALGORITHMS {
            let perfect = generate(&boundary_request(algorithm)).unwrap();
            let mut request = boundary_request(algorithm);
            request.perfect = false;
            let imperfect = generate(&request).unwrap();

            assert!(
                imperfect.maze().open_edge_count() > perfect.maze().open_edge_count(),
                "{algorithm} gained no redundant routes"
            );
            assert!(
                !has_open_block(imperfect.maze()),
                "{algorithm} melted cells into an open 2x2 block"
            );
        }
    }

    #[test]
    fn borders_stay_sealed() {
        for algorithm in ALGORITHMS {
            let generated = generate(&boundary_request(algorithm)).unwrap();
            let maze = generated.maze();
            for x in 0..maze.width() {
                assert!(!maze[(x, 0)].is_open());
                assert!(!maze[(x, maze.height() - 1)].is_open());
            }
            for y in 0..maze.height() {
                assert!(!maze[(0, y)].is_open());
                assert!(!maze[(maze.width() - 1, y)].is_open());
            }
        }
    }

    #[test]
    fn coincident_doorways_fail_before_carving() {
        let mut request = boundary_request(Algorithm::Prim);
        request.entry = (5, 5);
        request.exit = (5, 5);
        assert!(matches!(
            generate(&request),
            Err(Error::Config(ConfigError::EntryExitOverlap { x: 5, y: 5 }))
        ));
    }

    #[test]
    fn symbol_mazes_stay_solvable_around_the_glyph() {
        for algorithm in ALGORITHMS {
            let mut request = boundary_request(algorithm);
            request.symbol = true;
            let generated = generate(&request).unwrap();
            let maze = generated.maze();

            assert!(maze.rooms().any(|c| maze[c] == Cell::Blocked));
            let landing = generated.path().walk(generated.entry()).last();
            assert_eq!(landing, Some(generated.exit()));
        }
    }

    #[test]
    fn loop_target_tuning_is_honored() {
        let mut request = boundary_request(Algorithm::Backtracker);
        request.perfect = false;
        request.tuning.loop_target = Some(3);
        let perfect = generate(&boundary_request(Algorithm::Backtracker)).unwrap();
        let imperfect = generate(&request).unwrap();
        let added = imperfect.maze().open_edge_count() - perfect.maze().open_edge_count();
        assert!(added >= 1 && added <= 3);
    }
}
