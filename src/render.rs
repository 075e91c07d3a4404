use std::collections::HashSet;
use std::fmt::Write;

use crossterm::style::{Color, StyledContent, Stylize};

use crate::GeneratedMaze;
use crate::maze::{Cell, Coord};

/// Text snapshot of a generated maze: every lattice cell is drawn two
/// columns wide, with the doorways and (optionally) the solution route
/// picked out in color. This only reads the maze; the caller keeps ownership.
pub fn render(generated: &GeneratedMaze, show_route: bool) -> String {
    let maze = generated.maze();
    let route: HashSet<Coord> = if show_route {
        generated.path().walk(maze.entry()).collect()
    } else {
        HashSet::new()
    };

    let mut out = String::new();
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            let symbol = symbol_at(generated, &route, (x, y));
            #[cfg(debug_assertions)]
            {
                use unicode_width::UnicodeWidthStr;
                debug_assert_eq!(
                    symbol.content().width(),
                    2,
                    "Each cell must occupy exactly two character widths."
                );
            }
            let _ = write!(out, "{symbol}");
        }
        out.push('\n');
    }
    out
}

fn symbol_at(
    generated: &GeneratedMaze,
    route: &HashSet<Coord>,
    coord: Coord,
) -> StyledContent<&'static str> {
    let maze = generated.maze();
    if coord == maze.entry() {
        return "██".with(Color::Magenta);
    }
    if coord == maze.exit() {
        return "██".with(Color::Cyan);
    }
    match maze[coord] {
        Cell::Blocked => "██".with(Color::Yellow),
        Cell::Wall => "██".with(Color::White),
        Cell::Open if route.contains(&coord) => "··".with(Color::Green),
        Cell::Open => "  ".with(Color::Reset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationRequest, Tuning};
    use crate::generators::Algorithm;

    #[test]
    fn renders_one_line_per_lattice_row() {
        let request = GenerationRequest {
            width: 7,
            height: 7,
            entry: (1, 1),
            exit: (5, 5),
            perfect: true,
            algorithm: Algorithm::Prim,
            seed: Some(4),
            symbol: false,
            tuning: Tuning::default(),
        };
        let generated = crate::generate(&request).unwrap();
        let text = render(&generated, true);
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("██"));
        assert!(text.contains("··"));
    }
}
