use rand::{Rng, rngs::StdRng};

use crate::maze::{Cell, Coord, Direction, Maze};

/// Randomized Prim: grow the maze outward from a single seed room, always
/// carving from a uniformly random cell of the global frontier. Picking from
/// the whole frontier, not from one cell's neighbors, is what gives Prim its
/// short, branchy corridors.
pub fn carve(maze: &mut Maze, rng: &mut StdRng) {
    let start = maze.carve_start(maze.entry());
    maze.open(start);

    let mut frontier: Vec<Coord> = Vec::new();
    push_frontier(maze, start, &mut frontier);

    while !frontier.is_empty() {
        let idx = rng.random_range(0..frontier.len());
        let cell = frontier.swap_remove(idx);
        // The same room can be queued from several sides; only the first
        // pick carves it.
        if maze[cell] != Cell::Wall {
            continue;
        }

        let carved: Vec<Coord> = Direction::ALL
            .into_iter()
            .filter_map(|dir| maze.room_step(cell, dir))
            .filter(|&(wall, room)| maze[room].is_open() && maze[wall] != Cell::Blocked)
            .map(|(_, room)| room)
            .collect();

        if carved.is_empty() {
            continue;
        }
        let into = carved[rng.random_range(0..carved.len())];
        maze.carve(cell, into);
        push_frontier(maze, cell, &mut frontier);
    }
}

/// Queue every uncarved room two steps away from `from`.
fn push_frontier(maze: &Maze, from: Coord, frontier: &mut Vec<Coord>) {
    for dir in Direction::ALL {
        if let Some((_, room)) = maze.room_step(from, dir) {
            if maze[room] == Cell::Wall {
                frontier.push(room);
            }
        }
    }
}
