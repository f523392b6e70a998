//! Output projection: hands every open interior cell of a finished maze to a sink.

use log::debug;

use crate::grid::Maze;
use crate::types::Pos;

/// Receiver of a finished maze, such as a raster or file writer.
pub trait MazeSink {
    type Error;

    /// Declares one interior cell passable. Called at most once per cell.
    fn mark_open(&mut self, pos: Pos);

    /// Persists the accumulated result. Called exactly once, after every `mark_open`.
    fn finalize(&mut self) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub interior_cells: usize,
    pub open_cells: usize,
}

/// Scans `x in 1..width-1`, `y in 1..height-1`; the outer ring is never reported.
pub fn project<S: MazeSink>(maze: &Maze, sink: &mut S) -> Result<ProjectionSummary, S::Error> {
    let mut summary = ProjectionSummary::default();
    for y in 1..maze.height().saturating_sub(1) {
        for x in 1..maze.width().saturating_sub(1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            summary.interior_cells += 1;
            if maze.is_open(pos) {
                sink.mark_open(pos);
                summary.open_cells += 1;
            }
        }
    }
    sink.finalize()?;
    debug!("projected {} open of {} interior cells", summary.open_cells, summary.interior_cells);
    Ok(summary)
}
