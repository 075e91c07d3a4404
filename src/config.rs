use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::generators::Algorithm;
use crate::maze::Coord;

/// Smallest lattice that still has one interior room on each axis. Anything
/// larger is a caller policy, not a core invariant.
pub const MIN_DIMENSION: u16 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dimensions must be odd, got {width}x{height}")]
    EvenDimension { width: u16, height: u16 },
    #[error("dimensions must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {width}x{height}")]
    TooSmall { width: u16, height: u16 },
    #[error("{which} ({x},{y}) is outside the maze interior")]
    OutOfInterior { which: &'static str, x: u16, y: u16 },
    #[error("entry and exit must differ, both are ({x},{y})")]
    EntryExitOverlap { x: u16, y: u16 },
    #[error("{which} ({x},{y}) sits on the embedded symbol")]
    OnSymbol { which: &'static str, x: u16, y: u16 },
    #[error("{name} must be between 0 and 1, got {value}")]
    BadProbability { name: &'static str, value: f64 },
    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },
    #[error("{path}: missing required key {key}")]
    MissingKey { path: String, key: &'static str },
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
}

/// Policy knobs the algorithms treat as parameters rather than constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    /// Chance that Eller joins two adjacent different-set rooms horizontally
    /// (the last row always joins).
    pub eller_join_probability: f64,
    /// Chance that a non-forced set member also extends downward in Eller.
    pub eller_descend_probability: f64,
    /// Number of extra walls to open for a non-perfect maze. `None` derives
    /// `max(2, min(width, height) / 4)` from the dimensions.
    pub loop_target: Option<usize>,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            eller_join_probability: 0.5,
            eller_descend_probability: 0.5,
            loop_target: None,
        }
    }
}

impl Tuning {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("JOIN_PROBABILITY", self.eller_join_probability),
            ("DESCEND_PROBABILITY", self.eller_descend_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BadProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Everything the pipeline needs to produce one maze.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Lattice width; odd, at least [`MIN_DIMENSION`].
    pub width: u16,
    /// Lattice height; odd, at least [`MIN_DIMENSION`].
    pub height: u16,
    /// Doorway the solver starts from, strictly inside the border.
    pub entry: Coord,
    /// Doorway the solver aims for, strictly inside the border.
    pub exit: Coord,
    /// `false` enables loop injection after solving.
    pub perfect: bool,
    pub algorithm: Algorithm,
    /// Reproducibility seed. `None` draws one from the OS and logs it.
    pub seed: Option<u64>,
    /// Stamp the embedded glyph into the lattice before carving.
    pub symbol: bool,
    pub tuning: Tuning,
}

impl GenerationRequest {
    /// Checks the request before any carving happens. Violations are fatal
    /// configuration errors, never retried.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(ConfigError::TooSmall { width, height });
        }
        if width % 2 == 0 || height % 2 == 0 {
            return Err(ConfigError::EvenDimension { width, height });
        }
        for (which, (x, y)) in [("entry", self.entry), ("exit", self.exit)] {
            if x < 1 || y < 1 || x > width - 2 || y > height - 2 {
                return Err(ConfigError::OutOfInterior { which, x, y });
            }
        }
        if self.entry == self.exit {
            let (x, y) = self.entry;
            return Err(ConfigError::EntryExitOverlap { x, y });
        }
        self.tuning.validate()
    }
}

/// A parsed configuration file: the core request plus the driver-side
/// settings around it.
#[derive(Debug, Clone)]
pub struct Config {
    pub request: GenerationRequest,
    /// Where to write the encoded maze; `None` skips the file entirely.
    pub output_file: Option<PathBuf>,
    /// Print the colored text preview after generating.
    pub preview: bool,
}

impl Config {
    /// Parses the `KEY=VALUE` configuration format: one definition per line,
    /// `#` starts a comment, blank lines are skipped. The parsed request is
    /// validated before this returns.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let name = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: name.clone(),
            source,
        })?;
        Self::parse(&text, &name)
    }

    fn parse(text: &str, path: &str) -> Result<Self, ConfigError> {
        let mut width = None;
        let mut height = None;
        let mut entry = None;
        let mut exit = None;
        let mut algorithm = None;
        let mut perfect = true;
        let mut seed = None;
        let mut symbol = false;
        let mut output_file = None;
        let mut preview = true;
        let mut tuning = Tuning::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fail = |reason: String| ConfigError::Parse {
                path: path.to_string(),
                line: idx + 1,
                reason,
            };
            let Some((key, value)) = line.split_once('=') else {
                return Err(fail(format!("entry is not a definition: '{line}'")));
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "WIDTH" => width = Some(parse_dimension(value).map_err(fail)?),
                "HEIGHT" => height = Some(parse_dimension(value).map_err(fail)?),
                "ENTRY" => entry = Some(parse_coord(value).map_err(fail)?),
                "EXIT" => exit = Some(parse_coord(value).map_err(fail)?),
                "ALGORITHM" => {
                    algorithm = Some(Algorithm::from_str(value).map_err(fail)?);
                }
                "PERFECT" => perfect = parse_flag(value).map_err(fail)?,
                "SYMBOL" => symbol = parse_flag(value).map_err(fail)?,
                "PREVIEW" => preview = parse_flag(value).map_err(fail)?,
                "SEED" => {
                    let n: u64 = value
                        .parse()
                        .map_err(|_| fail(format!("invalid seed '{value}'")))?;
                    // Seed 0 means "pick one for me", matching the config
                    // files this format grew out of.
                    seed = (n != 0).then_some(n);
                }
                "OUTPUT_FILE" => output_file = Some(PathBuf::from(value)),
                "LOOPS" => {
                    let count: usize = value
                        .parse()
                        .map_err(|_| fail(format!("invalid loop count '{value}'")))?;
                    tuning.loop_target = Some(count);
                }
                "JOIN_PROBABILITY" => {
                    tuning.eller_join_probability = parse_probability(value).map_err(fail)?;
                }
                "DESCEND_PROBABILITY" => {
                    tuning.eller_descend_probability = parse_probability(value).map_err(fail)?;
                }
                _ => return Err(fail(format!("unknown entry: '{key}'"))),
            }
        }

        let missing = |key| ConfigError::MissingKey {
            path: path.to_string(),
            key,
        };
        let request = GenerationRequest {
            width: width.ok_or_else(|| missing("WIDTH"))?,
            height: height.ok_or_else(|| missing("HEIGHT"))?,
            entry: entry.ok_or_else(|| missing("ENTRY"))?,
            exit: exit.ok_or_else(|| missing("EXIT"))?,
            perfect,
            algorithm: algorithm.ok_or_else(|| missing("ALGORITHM"))?,
            seed,
            symbol,
            tuning,
        };
        request.validate()?;
        Ok(Config {
            request,
            output_file,
            preview,
        })
    }
}

fn parse_dimension(value: &str) -> Result<u16, String> {
    value
        .parse::<u16>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| format!("expected a positive number, got '{value}'"))
}

fn parse_coord(value: &str) -> Result<Coord, String> {
    let bad = || format!("expected 'x,y', got '{value}'");
    let (x, y) = value.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(format!("expected 0/1 or true/false, got '{value}'")),
    }
}

fn parse_probability(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("expected a number between 0 and 1, got '{value}'"))
}
