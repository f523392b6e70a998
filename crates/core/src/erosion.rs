//! Stochastic erosion that reopens wall cells to add cycles to a perfect maze.
//!
//! Every wall still standing gets one independent roll in `1..=100` and opens when the roll is
//! strictly below the imperfection level, so the per-wall probability is `(level - 1) / 100`
//! (never at level 0, 99% at level 100). The whole grid is scanned, border ring included.
//! Erosion only opens cells, so any route present before the pass survives it.

use log::debug;

use crate::grid::Maze;
use crate::rng::RandomSource;
use crate::types::CellState;

pub fn erode<R: RandomSource>(maze: &mut Maze, imperfection: u8, rng: &mut R) -> usize {
    let standing: Vec<_> =
        maze.walls().filter(|&pos| maze.cell_at(pos) == CellState::Wall).collect();

    let mut opened = 0;
    for pos in standing {
        let roll = rng.below(100) + 1;
        if roll < u32::from(imperfection) {
            maze.open(pos);
            opened += 1;
        }
    }

    debug!("erosion at level {imperfection} opened {opened} walls");
    opened
}
