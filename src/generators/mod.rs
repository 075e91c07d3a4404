use std::str::FromStr;

use rand::rngs::StdRng;

mod backtrack;
mod eller;
mod prim;

use crate::config::Tuning;
use crate::maze::Maze;

/// The carving algorithms the pipeline can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Prim,
    Backtracker,
    Eller,
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Prim => write!(f, "Randomized Prim"),
            Algorithm::Backtracker => write!(f, "Iterative Backtracker"),
            Algorithm::Eller => write!(f, "Eller's Algorithm"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prim" => Ok(Algorithm::Prim),
            "backtracker" => Ok(Algorithm::Backtracker),
            "eller" => Ok(Algorithm::Eller),
            _ => Err(format!(
                "unknown algorithm '{s}', expected PRIM, BACKTRACKER, or ELLER"
            )),
        }
    }
}

/// Resolve the configured seed, drawing a fresh one when absent so the run
/// can still be reproduced from the logs.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Carve passages into a fresh all-wall maze with the chosen algorithm.
pub fn carve_maze(maze: &mut Maze, algorithm: Algorithm, tuning: &Tuning, rng: &mut StdRng) {
    match algorithm {
        Algorithm::Prim => prim::carve(maze, rng),
        Algorithm::Backtracker => backtrack::carve(maze, rng),
        Algorithm::Eller => eller::carve(maze, tuning, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!(Algorithm::from_str("PRIM"), Ok(Algorithm::Prim));
        assert_eq!(Algorithm::from_str("eller"), Ok(Algorithm::Eller));
        assert_eq!(
            Algorithm::from_str("Backtracker"),
            Ok(Algorithm::Backtracker)
        );
        assert!(Algorithm::from_str("kruskal").is_err());
    }
}
