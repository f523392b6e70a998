//! Validated generation parameters threaded through every generation phase.

use std::error::Error;
use std::fmt;

pub const MAX_IMPERFECTION: u8 = 100;

/// Largest accepted width or height. Coordinates are `i32`, so every cell index must fit one.
pub const MAX_DIMENSION: i64 = i32::MAX as i64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveDimension { axis: Axis, value: i64 },
    EvenDimension { axis: Axis, value: i64 },
    DimensionTooLarge { axis: Axis, value: i64 },
    ImperfectionOutOfRange { value: i64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { axis, value } => {
                write!(f, "maze {axis} must be greater than 0, got {value}")
            }
            Self::EvenDimension { axis, value } => {
                write!(f, "maze {axis} must be odd, got {value}")
            }
            Self::DimensionTooLarge { axis, value } => {
                write!(f, "maze {axis} must be at most {MAX_DIMENSION}, got {value}")
            }
            Self::ImperfectionOutOfRange { value } => write!(
                f,
                "imperfection must be between 0 (no wall erased) and {MAX_IMPERFECTION} (every wall erased), got {value}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeConfig {
    width: usize,
    height: usize,
    imperfection: u8,
}

impl MazeConfig {
    /// Accepts raw signed input so that negative values surface as configuration errors
    /// instead of parse failures.
    pub fn new(width: i64, height: i64, imperfection: i64) -> Result<Self, ConfigError> {
        let width = validate_dimension(Axis::Width, width)?;
        let height = validate_dimension(Axis::Height, height)?;
        if !(0..=i64::from(MAX_IMPERFECTION)).contains(&imperfection) {
            return Err(ConfigError::ImperfectionOutOfRange { value: imperfection });
        }
        Ok(Self { width, height, imperfection: imperfection as u8 })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn imperfection(&self) -> u8 {
        self.imperfection
    }
}

fn validate_dimension(axis: Axis, value: i64) -> Result<usize, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositiveDimension { axis, value });
    }
    if value > MAX_DIMENSION {
        return Err(ConfigError::DimensionTooLarge { axis, value });
    }
    if value % 2 == 0 {
        return Err(ConfigError::EvenDimension { axis, value });
    }
    usize::try_from(value).map_err(|_| ConfigError::DimensionTooLarge { axis, value })
}
