//! JSON maze file: the persisted form of a projected maze and the input of the solver.
//!
//! The grid is stored as one string per row, `#` for wall, ` ` for open and `.` for a cell a
//! solution passes through. Writes go to a `.json.tmp` sibling first and are renamed into place.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::Maze;
use crate::projection::MazeSink;
use crate::types::Pos;

pub const FORMAT_VERSION: u32 = 1;

pub const WALL: char = '#';
pub const OPEN: char = ' ';
pub const VISITED: char = '.';

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MazeFile {
    pub format_version: u32,
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub imperfection: u8,
    pub rows: Vec<String>,
}

#[derive(Debug)]
pub enum MazeFileError {
    Io(io::Error),
    InvalidJson { message: String },
    UnsupportedVersion { found: u32 },
    InvalidShape { message: String },
    InvalidCell { row: usize, column: usize, found: char },
}

impl fmt::Display for MazeFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "maze file I/O error: {e}"),
            Self::InvalidJson { message } => write!(f, "maze file is not valid JSON: {message}"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported maze file format version {found}, expected {FORMAT_VERSION}")
            }
            Self::InvalidShape { message } => write!(f, "maze file has invalid shape: {message}"),
            Self::InvalidCell { row, column, found } => {
                write!(f, "unexpected cell {found:?} at row {row}, column {column}")
            }
        }
    }
}

impl Error for MazeFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl MazeFile {
    /// An all-wall raster of the given size, ready to be dug into.
    pub fn blank(width: usize, height: usize, seed: Option<u64>, imperfection: u8) -> Self {
        let row = WALL.to_string().repeat(width);
        Self {
            format_version: FORMAT_VERSION,
            width,
            height,
            seed,
            imperfection,
            rows: vec![row; height],
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Option<char> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.rows[pos.y as usize].as_bytes().get(pos.x as usize).map(|&b| char::from(b))
    }

    /// Overwrites one cell in place. Positions outside the raster and non-ASCII markers are
    /// ignored so every row keeps exactly `width` bytes.
    pub fn set_cell(&mut self, pos: Pos, cell: char) {
        if !self.in_bounds(pos) || !cell.is_ascii() {
            return;
        }
        let x = pos.x as usize;
        let Some(row) = self.rows.get_mut(pos.y as usize) else {
            return;
        };
        if !row.as_bytes().get(x).is_some_and(u8::is_ascii) {
            return;
        }
        let mut buffer = [0_u8; 4];
        row.replace_range(x..x + 1, cell.encode_utf8(&mut buffer));
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.bytes()
                .enumerate()
                .filter(|&(_, b)| char::from(b) != WALL)
                .map(move |(x, _)| Pos { y: y as i32, x: x as i32 })
        })
    }

    pub fn validate(&self) -> Result<(), MazeFileError> {
        if self.format_version != FORMAT_VERSION {
            return Err(MazeFileError::UnsupportedVersion { found: self.format_version });
        }
        if self.rows.len() != self.height {
            return Err(MazeFileError::InvalidShape {
                message: format!("expected {} rows, found {}", self.height, self.rows.len()),
            });
        }
        for (row_index, row) in self.rows.iter().enumerate() {
            for (column, found) in row.chars().enumerate() {
                if found != WALL && found != OPEN && found != VISITED {
                    return Err(MazeFileError::InvalidCell { row: row_index, column, found });
                }
            }
            if row.len() != self.width {
                return Err(MazeFileError::InvalidShape {
                    message: format!(
                        "row {row_index} has {} cells, expected {}",
                        row.len(),
                        self.width
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, MazeFileError> {
        let content = fs::read_to_string(path).map_err(MazeFileError::Io)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| MazeFileError::InvalidJson { message: e.to_string() })?;
        file.validate()?;
        Ok(file)
    }
}

/// Projection sink that digs open cells into a blank raster and writes it on finalize.
pub struct MazeFileSink {
    path: PathBuf,
    file: MazeFile,
}

impl MazeFileSink {
    pub fn new(path: impl Into<PathBuf>, maze: &Maze, seed: Option<u64>) -> Self {
        Self {
            path: path.into(),
            file: MazeFile::blank(maze.width(), maze.height(), seed, maze.imperfection()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &MazeFile {
        &self.file
    }
}

impl MazeSink for MazeFileSink {
    type Error = io::Error;

    fn mark_open(&mut self, pos: Pos) {
        self.file.set_cell(pos, OPEN);
    }

    fn finalize(&mut self) -> Result<(), Self::Error> {
        self.file.write_atomic(&self.path)
    }
}
