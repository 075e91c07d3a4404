use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::GeneratedMaze;
use crate::maze::{Coord, Direction, Maze};
use crate::solvers::SolutionPath;

/// Digit alphabet of the wire format; the nibble indexes straight into it.
const HEX_CHARSET: &[u8; 16] = b"0123456789ABCDEF";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("line {line}: invalid hex digit '{found}'")]
    BadDigit { line: usize, found: char },
    #[error("line {line}: expected {expected} digits, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid coordinate '{text}'")]
    BadCoordinate { line: usize, text: String },
    #[error("line {line}: invalid direction letter '{found}'")]
    BadDirection { line: usize, found: char },
    #[error("unexpected end of input")]
    Truncated,
}

/// Serialize a solved maze into the persisted text format: one hex digit per
/// room (bit set = open passage; N=1, E=2, S=4, W=8), a blank line, the entry
/// and exit coordinates, then the route as one string of direction letters.
/// This is the crate's only bit-exact wire contract.
pub fn encode(generated: &GeneratedMaze) -> String {
    let maze = generated.maze();
    let mut out = String::new();
    for y in (1..maze.height()).step_by(2) {
        for x in (1..maze.width()).step_by(2) {
            out.push(HEX_CHARSET[nibble(maze, (x, y)) as usize] as char);
        }
        out.push('\n');
    }
    out.push('\n');
    let (x, y) = maze.entry();
    out.push_str(&format!("{x},{y}\n"));
    let (x, y) = maze.exit();
    out.push_str(&format!("{x},{y}\n"));
    out.push_str(&generated.path().to_string());
    out.push('\n');
    out
}

/// Write the encoded maze in one shot. The whole artifact is built in memory
/// first, so a failed write never leaves a half-written file behind.
pub fn write_file(generated: &GeneratedMaze, path: &Path) -> Result<(), std::io::Error> {
    fs::write(path, encode(generated))
}

/// Open-wall nibble of one room cell, from its four unit neighbors.
pub(crate) fn nibble(maze: &Maze, room: Coord) -> u8 {
    let mut bits = 0;
    for (bit, dir) in Direction::ALL.into_iter().enumerate() {
        let open = dir
            .step(room)
            .is_some_and(|c| maze.in_bounds(c) && maze[c].is_open());
        if open {
            bits |= 1 << bit;
        }
    }
    bits
}

/// A maze read back from the persisted text format.
#[derive(Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Open-wall nibbles per room, row-major.
    pub rooms: Vec<Vec<u8>>,
    pub entry: Coord,
    pub exit: Coord,
    pub path: SolutionPath,
}

/// Parse the text format back into nibbles, doorways, and route. Together
/// with [`encode`] this is the round-trip surface of the wire contract.
pub fn decode(text: &str) -> Result<Decoded, CodecError> {
    let mut lines = text.lines().enumerate();

    let mut rooms: Vec<Vec<u8>> = Vec::new();
    for (idx, line) in lines.by_ref() {
        if line.is_empty() {
            break;
        }
        let mut row = Vec::with_capacity(line.len());
        for found in line.chars() {
            let digit = HEX_CHARSET
                .iter()
                .position(|&d| d as char == found)
                .ok_or(CodecError::BadDigit {
                    line: idx + 1,
                    found,
                })?;
            row.push(digit as u8);
        }
        if let Some(first) = rooms.first() {
            if first.len() != row.len() {
                return Err(CodecError::RaggedRow {
                    line: idx + 1,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rooms.push(row);
    }

    let entry = parse_coord(lines.next().ok_or(CodecError::Truncated)?)?;
    let exit = parse_coord(lines.next().ok_or(CodecError::Truncated)?)?;

    let (idx, letters) = lines.next().ok_or(CodecError::Truncated)?;
    let mut steps = Vec::with_capacity(letters.len());
    for found in letters.chars() {
        steps.push(Direction::from_char(found).ok_or(CodecError::BadDirection {
            line: idx + 1,
            found,
        })?);
    }

    Ok(Decoded {
        rooms,
        entry,
        exit,
        path: SolutionPath::new(steps),
    })
}

fn parse_coord((idx, line): (usize, &str)) -> Result<Coord, CodecError> {
    let bad = || CodecError::BadCoordinate {
        line: idx + 1,
        text: line.to_string(),
    };
    let (x, y) = line.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}
