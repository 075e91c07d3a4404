use thiserror::Error;

use crate::config::ConfigError;
use crate::generators::Algorithm;
use crate::solvers::SolveError;

/// Top-level failure taxonomy. Configuration problems are caller errors and
/// surface before any carving; generation problems are internal bug signals
/// carrying enough context to reproduce the run; I/O problems come from
/// writing the output artifact. "No route found" on a healthy grid is not an
/// error at this level; the solver reports it as a typed result first.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{algorithm} produced an unsolvable {width}x{height} maze (seed {seed}): {source}")]
    Generation {
        algorithm: Algorithm,
        width: u16,
        height: u16,
        seed: u64,
        source: SolveError,
    },
    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}
