//! Grid model: every coordinate of an odd-by-odd rectangle classified as room or wall.
//!
//! Rooms sit at odd/odd coordinates and are open from the start. Everything else is a wall
//! that can only be opened as a tree connector or by erosion. Cells never revert to wall.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64;

use crate::config::MazeConfig;
use crate::error::MazeError;
use crate::types::{CellState, Pos};

/// Room the spanning tree grows from.
pub const START_ROOM: Pos = Pos { y: 1, x: 1 };

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    imperfection: u8,
    cells: Vec<CellState>,
}

impl Maze {
    pub fn initialize(config: &MazeConfig) -> Result<Self, MazeError> {
        let width = config.width();
        let height = config.height();
        let allocation_error = MazeError::Allocation { width, height };

        let len = width.checked_mul(height).ok_or(allocation_error.clone())?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| allocation_error)?;

        for y in 0..height {
            for x in 0..width {
                cells.push(if is_room_coordinate(x, y) { CellState::Open } else { CellState::Wall });
            }
        }

        Ok(Self { width, height, imperfection: config.imperfection(), cells })
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

    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-range coordinates read as wall.
    pub fn cell_at(&self, pos: Pos) -> CellState {
        if !self.in_bounds(pos) {
            return CellState::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.cell_at(pos) == CellState::Open
    }

    pub fn is_room(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && is_room_coordinate(pos.x as usize, pos.y as usize)
    }

    pub fn rooms(&self) -> impl Iterator<Item = Pos> + '_ {
        (1..self.height)
            .step_by(2)
            .flat_map(move |y| (1..self.width).step_by(2).map(move |x| pos(x, y)))
    }

    pub fn room_count(&self) -> usize {
        (self.width / 2) * (self.height / 2)
    }

    pub fn walls(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| !self.is_room(p))
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| pos(x, y)))
    }

    /// Wall cells that have been opened, either as tree connectors or by erosion.
    pub fn open_wall_count(&self) -> usize {
        self.walls().filter(|&p| self.is_open(p)).count()
    }

    pub(crate) fn open(&mut self, pos: Pos) {
        debug_assert!(self.in_bounds(pos));
        let idx = self.index(pos);
        self.cells[idx] = CellState::Open;
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(9 + self.cells.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.push(self.imperfection);
        for cell in &self.cells {
            bytes.push(match cell {
                CellState::Wall => 0,
                CellState::Open => 1,
            });
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                f.write_str(match cell {
                    CellState::Wall => "#",
                    CellState::Open => " ",
                })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn is_room_coordinate(x: usize, y: usize) -> bool {
    x % 2 == 1 && y % 2 == 1
}

// `MazeConfig` caps both dimensions at `i32::MAX`, so in-grid indices always fit.
fn pos(x: usize, y: usize) -> Pos {
    Pos { y: y as i32, x: x as i32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(width: i64, height: i64) -> Maze {
        Maze::initialize(&MazeConfig::new(width, height, 0).expect("valid config"))
            .expect("allocation should succeed")
    }

    #[test]
    fn rooms_are_open_and_everything_else_is_wall_after_initialize() {
        let maze = maze(5, 7);
        for p in maze.positions() {
            let expected_room = p.x % 2 == 1 && p.y % 2 == 1;
            assert_eq!(maze.is_room(p), expected_room, "classification at {p:?}");
            assert_eq!(maze.is_open(p), expected_room, "initial state at {p:?}");
        }
        assert_eq!(maze.room_count(), 6);
        assert_eq!(maze.rooms().count(), 6);
        assert_eq!(maze.open_wall_count(), 0);
    }

    #[test]
    fn rooms_iterate_in_row_major_order() {
        let maze = maze(5, 5);
        let rooms: Vec<Pos> = maze.rooms().collect();
        assert_eq!(
            rooms,
            vec![Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 }, Pos { y: 3, x: 1 }, Pos { y: 3, x: 3 }]
        );
    }

    #[test]
    fn out_of_range_reads_as_wall() {
        let maze = maze(3, 3);
        assert_eq!(maze.cell_at(Pos { y: -1, x: 1 }), CellState::Wall);
        assert_eq!(maze.cell_at(Pos { y: 1, x: 3 }), CellState::Wall);
        assert!(!maze.is_room(Pos { y: 3, x: 3 }));
    }

    #[test]
    fn single_cell_maze_has_no_rooms() {
        let maze = maze(1, 1);
        assert_eq!(maze.room_count(), 0);
        assert_eq!(maze.rooms().count(), 0);
        assert_eq!(maze.to_string(), "#\n");
    }

    #[test]
    fn display_renders_one_row_per_line() {
        let maze = maze(5, 3);
        assert_eq!(maze.to_string(), "#####\n# # #\n#####\n");
    }

    #[test]
    fn fingerprint_tracks_cell_changes() {
        let mut maze = maze(5, 5);
        let before = maze.fingerprint();
        maze.open(Pos { y: 1, x: 2 });
        assert_ne!(before, maze.fingerprint());
        assert_eq!(maze.open_wall_count(), 1);
    }
}
