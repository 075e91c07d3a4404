use rand::{Rng, rngs::StdRng};

use crate::config::Tuning;
use crate::maze::{Cell, Coord, Maze};

/// Eller's algorithm: carve one room row at a time, tracking which set each
/// column belongs to. Only a single row of set ids is ever alive, so the
/// bookkeeping stays O(width) no matter how tall the maze grows.
///
/// Per row: set-less columns get fresh singleton ids, adjacent columns of
/// different sets are joined at random (always on the last row, which is what
/// guarantees a single connected component at the bottom), and every
/// surviving set sends at least one column downward before the next row.
/// Blocked glyph cells are treated as permanently outside the vertex set.
pub fn carve(maze: &mut Maze, tuning: &Tuning, rng: &mut StdRng) {
    let room_cols = ((maze.width() - 1) / 2) as usize;
    let last_row = maze.height() - 2;

    // Set id per room column for the row being processed.
    let mut ids: Vec<Option<u32>> = vec![None; room_cols];
    let mut next_id: u32 = 0;

    let mut y = 1;
    while y <= last_row {
        let is_last = y == last_row;

        // Open this row's rooms; set-less columns become singletons.
        for col in 0..room_cols {
            let cell = room(col, y);
            if maze[cell] == Cell::Blocked {
                ids[col] = None;
                continue;
            }
            maze.open(cell);
            if ids[col].is_none() {
                ids[col] = Some(next_id);
                next_id += 1;
            }
        }

        // Horizontal joins between adjacent columns of different sets.
        for col in 1..room_cols {
            let left = room(col - 1, y);
            let right = room(col, y);
            let wall = (right.0 - 1, y);
            if maze[left] == Cell::Blocked
                || maze[right] == Cell::Blocked
                || maze[wall] == Cell::Blocked
            {
                continue;
            }
            let (Some(a), Some(b)) = (ids[col - 1], ids[col]) else {
                continue;
            };
            if a == b {
                continue;
            }
            if is_last || rng.random_bool(tuning.eller_join_probability) {
                maze.carve(left, right);
                merge(&mut ids, a, b);
            }
        }

        if is_last {
            break;
        }

        // Vertical extensions. Skipping a set entirely would strand its rooms
        // above this row, so one member always descends.
        let mut carried: Vec<Option<u32>> = vec![None; room_cols];
        for id in distinct(&ids) {
            let members: Vec<usize> = (0..room_cols)
                .filter(|&col| {
                    let (x, _) = room(col, y);
                    ids[col] == Some(id)
                        && maze[(x, y + 1)] != Cell::Blocked
                        && maze[(x, y + 2)] != Cell::Blocked
                })
                .collect();
            // A set walled in by the glyph cannot descend; the repair pass
            // and the solver decide whether that matters.
            if members.is_empty() {
                continue;
            }
            let forced = members[rng.random_range(0..members.len())];
            for &col in &members {
                if col == forced || rng.random_bool(tuning.eller_descend_probability) {
                    maze.carve(room(col, y), room(col, y + 2));
                    carried[col] = Some(id);
                }
            }
        }
        ids = carried;
        y += 2;
    }
}

fn room(col: usize, y: u16) -> Coord {
    (2 * col as u16 + 1, y)
}

/// Relabel every column of the losing set with the winning id; an O(width)
/// scan over the row being processed.
fn merge(ids: &mut [Option<u32>], a: u32, b: u32) {
    let (winner, loser) = if a < b { (a, b) } else { (b, a) };
    for slot in ids.iter_mut() {
        if *slot == Some(loser) {
            *slot = Some(winner);
        }
    }
}

/// Set ids present in the row, in order of first appearance.
fn distinct(ids: &[Option<u32>]) -> Vec<u32> {
    let mut seen = Vec::new();
    for id in ids.iter().flatten() {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}
