use rand::{rngs::StdRng, seq::SliceRandom};

use crate::maze::{Cell, Coord, Direction, Maze};
use crate::solvers::SolutionPath;

/// Reconnect any interior cell a generator left open but isolated (no open
/// neighbor at all). Doorway pre-seeding can strand such cells. Cells that
/// already touch a passage are never modified, so correct regions stay
/// untouched.
pub fn repair(maze: &mut Maze) {
    for y in 1..maze.height() - 1 {
        for x in 1..maze.width() - 1 {
            let cell = (x, y);
            if !maze[cell].is_open() {
                continue;
            }
            if maze.unit_neighbors(cell).any(|c| maze[c].is_open()) {
                continue;
            }
            reconnect(maze, cell);
        }
    }
}

/// Open one wall next to an isolated cell, toward a side that already
/// reaches a passage, then locally absorb any rooms still walled off around
/// it.
fn reconnect(maze: &mut Maze, cell: Coord) {
    tracing::debug!(?cell, "reconnecting isolated cell");
    for dir in Direction::ALL {
        let Some(wall) = dir.step(cell) else { continue };
        if !maze.is_interior(wall) || maze[wall] != Cell::Wall {
            continue;
        }
        let reaches_passage = maze
            .unit_neighbors(wall)
            .any(|c| c != cell && maze[c].is_open());
        if !reaches_passage {
            continue;
        }
        maze.open(wall);
        absorb(maze, cell);
        return;
    }
}

/// Local carve pass from a freshly reconnected room: pull in neighbors that
/// no generator ever reached. Only meaningful from room parity.
fn absorb(maze: &mut Maze, from: Coord) {
    if from.0 % 2 == 0 || from.1 % 2 == 0 {
        return;
    }
    let mut stack = vec![from];
    while let Some(cell) = stack.pop() {
        for dir in Direction::ALL {
            let Some((wall, room)) = maze.room_step(cell, dir) else {
                continue;
            };
            if maze[room] == Cell::Wall && maze[wall] == Cell::Wall {
                maze.carve(cell, room);
                stack.push(room);
            }
        }
    }
}

/// Default number of extra connections for a non-perfect maze.
pub fn default_loop_target(width: u16, height: u16) -> usize {
    (width.min(height) as usize / 4).max(2)
}

/// Open up to `target` extra walls adjacent to rooms on the solution route,
/// each one closing exactly one cycle. A candidate that would melt four
/// rooms into one open block is skipped and the next one tried; opening
/// walls can never disconnect anything.
pub fn inject_loops(
    maze: &mut Maze,
    path: &SolutionPath,
    target: usize,
    rng: &mut StdRng,
) -> usize {
    let mut route: Vec<Coord> = path
        .walk(maze.entry())
        .filter(|&(x, y)| x % 2 == 1 && y % 2 == 1)
        .collect();
    route.shuffle(rng);

    let mut added = 0;
    for &cell in &route {
        if added >= target {
            break;
        }
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);
        for dir in dirs {
            let Some((wall, room)) = maze.room_step(cell, dir) else {
                continue;
            };
            if maze[wall] != Cell::Wall || !maze[room].is_open() {
                continue;
            }
            if opens_room_block(maze, wall) {
                continue;
            }
            maze.carve(cell, room);
            added += 1;
            break;
        }
    }
    if added < target {
        tracing::debug!(added, target, "ran out of loop candidates");
    }
    added
}

/// Whether opening `wall` would leave a 2x2 square of rooms with all four
/// connecting slots open, which reads as one unstructured open room instead
/// of corridors.
fn opens_room_block(maze: &Maze, wall: Coord) -> bool {
    let (wx, wy) = (wall.0 as i32, wall.1 as i32);
    // The slot joins east-west rooms when it sits on an odd row; the two
    // candidate room squares share that edge.
    let origins = if wall.1 % 2 == 1 {
        [(wx - 1, wy - 2), (wx - 1, wy)]
    } else {
        [(wx - 2, wy - 1), (wx, wy - 1)]
    };
    for (x0, y0) in origins {
        if x0 < 1 || y0 < 1 {
            continue;
        }
        let (x0, y0) = (x0 as u16, y0 as u16);
        if x0 + 2 > maze.width() - 2 || y0 + 2 > maze.height() - 2 {
            continue;
        }
        let slots = [
            (x0 + 1, y0),
            (x0 + 1, y0 + 2),
            (x0, y0 + 1),
            (x0 + 2, y0 + 1),
        ];
        if slots.into_iter().all(|c| c == wall || maze[c].is_open()) {
            return true;
        }
    }
    false
}
