use rand::{Rng, rngs::StdRng};

use crate::maze::{Cell, Coord, Direction, Maze};

/// Depth-first carving with an explicit stack. Deep grids overflow a
/// recursive formulation, so the iterative form is a correctness requirement
/// here, not a style choice.
pub fn carve(maze: &mut Maze, rng: &mut StdRng) {
    let start = maze.carve_start(maze.entry());
    maze.open(start);

    let mut stack = vec![start];
    while let Some(&cell) = stack.last() {
        let candidates: Vec<Coord> = Direction::ALL
            .into_iter()
            .filter_map(|dir| maze.room_step(cell, dir))
            .filter(|&(wall, room)| maze[wall] != Cell::Blocked && eligible(maze, room))
            .map(|(_, room)| room)
            .collect();

        if candidates.is_empty() {
            stack.pop();
            continue;
        }

        let room = candidates[rng.random_range(0..candidates.len())];
        maze.carve(cell, room);
        // Doorways are absorbed in place, never descended from: carving
        // onward out of the exit would wrap a second route around the goal.
        if room != maze.entry() && room != maze.exit() {
            stack.push(room);
        }
    }
}

/// A room is carvable while it is still walled. The doorway cells are the
/// exception: each may be connected exactly once, and only while no other
/// passage has reached it, so no loop can close right at the goal.
fn eligible(maze: &Maze, room: Coord) -> bool {
    if room == maze.entry() || room == maze.exit() {
        return !maze.unit_neighbors(room).any(|c| maze[c].is_open());
    }
    maze[room] == Cell::Wall
}
