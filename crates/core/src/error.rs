//! Failure taxonomy for maze generation.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Parameters were rejected before any cell was allocated.
    Configuration(ConfigError),
    /// Backing storage for `width * height` cells could not be obtained.
    Allocation { width: usize, height: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "invalid maze configuration: {e}"),
            Self::Allocation { width, height } => {
                write!(f, "out of memory allocating a {width}x{height} maze")
            }
        }
    }
}

impl Error for MazeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Allocation { .. } => None,
        }
    }
}

impl From<ConfigError> for MazeError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value)
    }
}
