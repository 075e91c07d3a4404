pub mod cell;
mod grid;

pub use cell::Cell;
use grid::Grid;

use crate::config::{ConfigError, GenerationRequest};

/// A lattice coordinate, `(x, y)` with `x` growing east and `y` growing south.
pub type Coord = (u16, u16);

/// Cardinal step directions, in the fixed N, E, S, W order the solver expands
/// neighbors in and the encoder assigns nibble bits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The letter this direction carries in the encoded path string.
    pub fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// One lattice step from `from`, unless it would leave the lattice on the
    /// north or west side. The caller still has to bounds-check the far edges.
    pub fn step(self, from: Coord) -> Option<Coord> {
        let (dx, dy) = self.delta();
        let nx = from.0 as i32 + dx;
        let ny = from.1 as i32 + dy;
        (nx >= 0 && ny >= 0).then_some((nx as u16, ny as u16))
    }

    /// The direction of the unit displacement from `a` to `b`, if there is one.
    pub fn between(a: Coord, b: Coord) -> Option<Self> {
        let dx = b.0 as i32 - a.0 as i32;
        let dy = b.1 as i32 - a.1 as i32;
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

/// Glyph stamped into the lattice center when the request asks for an
/// embedded symbol. Each row is one room row; `#` marks a blocked room.
const GLYPH: [&str; 5] = ["..#..", ".###.", "#####", ".###.", "..#.."];

/// The maze lattice plus its two doorway coordinates. All carving funnels
/// through [`Maze::carve`] so the open/wall convention stays consistent
/// across generators, post-processing, solving, and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    entry: Coord,
    exit: Coord,
}

impl Maze {
    /// Builds the all-wall lattice for a validated request, stamping the
    /// optional glyph. Fails if entry or exit lands on a blocked cell.
    pub fn new(request: &GenerationRequest) -> Result<Self, ConfigError> {
        let grid = Grid::new(request.width, request.height, Cell::Wall);
        let mut maze = Maze {
            grid,
            entry: request.entry,
            exit: request.exit,
        };
        if request.symbol {
            maze.stamp_glyph();
        }
        for (which, (x, y)) in [("entry", maze.entry), ("exit", maze.exit)] {
            if maze.grid[(x, y)] == Cell::Blocked {
                return Err(ConfigError::OnSymbol { which, x, y });
            }
        }
        Ok(maze)
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn entry(&self) -> Coord {
        self.entry
    }

    pub fn exit(&self) -> Coord {
        self.exit
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width() && coord.1 < self.height()
    }

    pub fn is_interior(&self, coord: Coord) -> bool {
        coord.0 >= 1
            && coord.1 >= 1
            && coord.0 <= self.width() - 2
            && coord.1 <= self.height() - 2
    }

    /// Turns a wall cell into a passage. Blocked cells stay blocked.
    pub fn open(&mut self, coord: Coord) {
        if self.grid[coord] == Cell::Wall {
            self.grid[coord] = Cell::Open;
        }
    }

    /// Opens the passage between two room cells two lattice steps apart,
    /// clearing the wall slot between them.
    pub fn carve(&mut self, a: Coord, b: Coord) {
        debug_assert!(
            (a.0 == b.0 || a.1 == b.1) && a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 2,
            "carve endpoints must be two lattice steps apart on one axis"
        );
        let wall = ((a.0 + b.0) / 2, (a.1 + b.1) / 2);
        self.open(a);
        self.open(wall);
        self.open(b);
    }

    /// The wall slot and the cell two steps away in `dir`, when both are
    /// still inside the lattice.
    pub fn room_step(&self, from: Coord, dir: Direction) -> Option<(Coord, Coord)> {
        let wall = dir.step(from)?;
        let room = dir.step(wall)?;
        self.in_bounds(room).then_some((wall, room))
    }

    /// In-bounds cells one lattice step away, in N, E, S, W order.
    pub fn unit_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| dir.step(coord))
            .filter(|&c| self.in_bounds(c))
    }

    /// All room cells (odd parity) in row-major order.
    pub fn rooms(&self) -> impl Iterator<Item = Coord> + '_ {
        let (w, h) = (self.width(), self.height());
        (1..h)
            .step_by(2)
            .flat_map(move |y| (1..w).step_by(2).map(move |x| (x, y)))
    }

    /// The room cell a single-seed generator grows from: `hint` clamped into
    /// the interior at odd parity, falling back to the first free room when
    /// the clamped cell sits on the glyph.
    pub fn carve_start(&self, hint: Coord) -> Coord {
        let clamp_odd = |v: u16, max: u16| {
            let v = v.clamp(1, max - 2);
            if v % 2 == 0 {
                if v < max - 2 { v + 1 } else { v - 1 }
            } else {
                v
            }
        };
        let start = (
            clamp_odd(hint.0, self.width()),
            clamp_odd(hint.1, self.height()),
        );
        if self.grid[start] != Cell::Blocked {
            return start;
        }
        self.rooms()
            .find(|&c| self.grid[c] != Cell::Blocked)
            .unwrap_or(start)
    }

    /// Entry and exit must be traversable whatever their parity; generators
    /// only carve room cells, so the doorway cells are forced open before the
    /// repair pass runs.
    pub fn open_endpoints(&mut self) {
        let (entry, exit) = (self.entry, self.exit);
        self.open(entry);
        self.open(exit);
    }

    /// Forces the outer ring back to walls. Cells coinciding with entry or
    /// exit are left alone, modelling a doorway through the border.
    pub fn seal_borders(&mut self) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                if !self.grid.is_boundary(x, y) {
                    continue;
                }
                if (x, y) == self.entry || (x, y) == self.exit {
                    continue;
                }
                if self.grid[(x, y)] == Cell::Open {
                    self.grid[(x, y)] = Cell::Wall;
                }
            }
        }
    }

    /// Number of open wall slots, i.e. carved passages between adjacent
    /// rooms. A perfect maze over `n` reachable rooms has exactly `n - 1`.
    pub fn open_edge_count(&self) -> usize {
        let mut count = 0;
        for y in 1..self.height() - 1 {
            for x in 1..self.width() - 1 {
                let is_slot = (x % 2 == 1) != (y % 2 == 1);
                if is_slot && self.grid[(x, y)].is_open() {
                    count += 1;
                }
            }
        }
        count
    }

    fn stamp_glyph(&mut self) {
        let rows = GLYPH.len() as u16;
        let cols = GLYPH[0].len() as u16;
        let room_cols = (self.width() - 1) / 2;
        let room_rows = (self.height() - 1) / 2;
        if cols + 2 > room_cols || rows + 2 > room_rows {
            tracing::debug!("lattice too small for the embedded glyph, skipping");
            return;
        }
        let x0 = (room_cols - cols) / 2;
        let y0 = (room_rows - rows) / 2;
        for (r, row) in GLYPH.iter().enumerate() {
            for (c, byte) in row.bytes().enumerate() {
                if byte != b'#' {
                    continue;
                }
                let x = 2 * (x0 + c as u16) + 1;
                let y = 2 * (y0 + r as u16) + 1;
                self.grid[(x, y)] = Cell::Blocked;
                // Block the slot toward adjacent glyph rooms as well, so the
                // shape reads as one solid region.
                if c > 0 && row.as_bytes()[c - 1] == b'#' {
                    self.grid[(x - 1, y)] = Cell::Blocked;
                }
                if r > 0 && GLYPH[r - 1].as_bytes()[c] == b'#' {
                    self.grid[(x, y - 1)] = Cell::Blocked;
                }
            }
        }
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationRequest, Tuning};
    use crate::generators::Algorithm;

    fn request(width: u16, height: u16) -> GenerationRequest {
        GenerationRequest {
            width,
            height,
            entry: (1, 1),
            exit: (width - 2, height - 2),
            perfect: true,
            algorithm: Algorithm::Prim,
            seed: Some(1),
            symbol: false,
            tuning: Tuning::default(),
        }
    }

    #[test]
    fn direction_between_inverts_step() {
        for dir in Direction::ALL {
            let from = (5, 5);
            let to = dir.step(from).unwrap();
            assert_eq!(Direction::between(from, to), Some(dir));
            assert_eq!(Direction::between(to, from), Some(dir.opposite()));
        }
        assert_eq!(Direction::between((5, 5), (6, 6)), None);
        assert_eq!(Direction::between((5, 5), (5, 5)), None);
    }

    #[test]
    fn carve_opens_both_rooms_and_the_wall_between() {
        let mut maze = Maze::new(&request(7, 7)).unwrap();
        maze.carve((1, 1), (3, 1));
        assert_eq!(maze[(1, 1)], Cell::Open);
        assert_eq!(maze[(2, 1)], Cell::Open);
        assert_eq!(maze[(3, 1)], Cell::Open);
        assert_eq!(maze[(4, 1)], Cell::Wall);
    }

    #[test]
    fn carve_start_clamps_into_odd_interior() {
        let maze = Maze::new(&request(15, 15)).unwrap();
        assert_eq!(maze.carve_start((0, 0)), (1, 1));
        assert_eq!(maze.carve_start((200, 7)), (13, 7));
        assert_eq!(maze.carve_start((4, 4)), (5, 5));
        assert_eq!(maze.carve_start((13, 13)), (13, 13));
    }

    #[test]
    fn glyph_blocks_center_rooms() {
        let mut req = request(31, 31);
        req.symbol = true;
        let maze = Maze::new(&req).unwrap();
        assert_eq!(maze[(15, 15)], Cell::Blocked);
        assert_eq!(maze[(1, 1)], Cell::Wall);

        // A doorway on the glyph is a configuration error.
        req.entry = (15, 15);
        assert!(matches!(
            Maze::new(&req),
            Err(ConfigError::OnSymbol { which: "entry", .. })
        ));
    }

    #[test]
    fn seal_borders_closes_stray_openings() {
        let mut maze = Maze::new(&request(7, 7)).unwrap();
        maze.open((3, 0));
        maze.seal_borders();
        assert_eq!(maze[(3, 0)], Cell::Wall);
    }

    #[test]
    fn open_edge_count_tracks_carves() {
        let mut maze = Maze::new(&request(7, 7)).unwrap();
        assert_eq!(maze.open_edge_count(), 0);
        maze.carve((1, 1), (3, 1));
        maze.carve((3, 1), (3, 3));
        assert_eq!(maze.open_edge_count(), 2);
    }
}
