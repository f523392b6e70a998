//! High-level generation orchestration: grid model, spanning tree, then erosion.

use log::debug;

use crate::builder::build_spanning_tree;
use crate::config::MazeConfig;
use crate::erosion::erode;
use crate::error::MazeError;
use crate::grid::{Maze, START_ROOM};
use crate::rng::{MazeRng, RandomSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub rooms: usize,
    pub tree_links: usize,
    pub advance_steps: usize,
    pub eroded_walls: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMaze {
    pub maze: Maze,
    pub stats: GenerationStats,
}

pub struct MazeGenerator {
    config: MazeConfig,
}

impl MazeGenerator {
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<GeneratedMaze, MazeError> {
        let mut maze = Maze::initialize(&self.config)?;
        debug!(
            "initialized {}x{} grid with {} rooms",
            maze.width(),
            maze.height(),
            maze.room_count()
        );

        let tree = build_spanning_tree(&mut maze, START_ROOM, rng);
        let tree_links = maze.open_wall_count();
        let eroded_walls = erode(&mut maze, self.config.imperfection(), rng);

        Ok(GeneratedMaze {
            maze,
            stats: GenerationStats {
                rooms: tree.rooms,
                tree_links,
                advance_steps: tree.advance_steps,
                eroded_walls,
            },
        })
    }
}

pub fn generate_maze(config: &MazeConfig, seed: u64) -> Result<GeneratedMaze, MazeError> {
    MazeGenerator::new(*config).generate(&mut MazeRng::from_seed(seed))
}
