//! Seeded maze generation: a randomized spanning tree over room cells followed by an
//! optional erosion pass that adds cycles.

pub mod builder;
pub mod config;
pub mod erosion;
pub mod error;
pub mod generator;
pub mod grid;
pub mod maze_file;
pub mod projection;
pub mod rng;
pub mod solve;
pub mod types;

pub use config::{Axis, ConfigError, MAX_DIMENSION, MAX_IMPERFECTION, MazeConfig};
pub use error::MazeError;
pub use generator::{GeneratedMaze, GenerationStats, MazeGenerator, generate_maze};
pub use grid::{Maze, START_ROOM};
pub use maze_file::{MazeFile, MazeFileError, MazeFileSink};
pub use projection::{MazeSink, ProjectionSummary, project};
pub use rng::{MazeRng, RandomSource};
pub use solve::{SolveSession, SolverGrid, astar_path, solve};
pub use types::*;
