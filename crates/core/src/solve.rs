//! Solver boundary over a persisted maze and a deterministic A* search.
//! This module exists so a consumer can walk a maze without knowing how it was generated.
//! It does not own generation or the on-disk format, only their read side.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use log::debug;

use crate::maze_file::{MazeFile, MazeFileError, VISITED, WALL};
use crate::types::Pos;

/// What a path search needs from a maze.
pub trait SolverGrid {
    type Error;

    /// False for walls and for anything outside the grid.
    fn is_free(&self, pos: Pos) -> bool;

    fn start(&self) -> Option<Pos>;

    fn end(&self) -> Option<Pos>;

    fn mark_visited(&mut self, pos: Pos);

    fn persist_solution(&mut self, label: &str) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Shortest 4-connected route from `start` to `goal`, both endpoints included.
pub fn astar_path<G: SolverGrid + ?Sized>(grid: &G, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    if !grid.is_free(start) || !grid.is_free(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let cur_g = g_score.get(&p).copied().unwrap_or(u32::MAX);
        for n in neighbors(p) {
            if !grid.is_free(n) {
                continue;
            }
            let tg = cur_g.saturating_add(1);
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        let Some(&previous) = came.get(&p) else {
            break;
        };
        p = previous;
        result.push(p);
    }
    result.reverse();
    result
}

fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Searches from `start()` to `end()` and marks every cell of the route visited.
pub fn solve<G: SolverGrid + ?Sized>(grid: &mut G) -> Option<Vec<Pos>> {
    let start = grid.start()?;
    let goal = grid.end()?;
    let path = astar_path(&*grid, start, goal)?;
    for &pos in &path {
        grid.mark_visited(pos);
    }
    debug!("solved {start:?} -> {goal:?} in {} cells", path.len());
    Some(path)
}

/// A maze file loaded for solving. Solutions are written next to the source file.
pub struct SolveSession {
    source: PathBuf,
    file: MazeFile,
}

impl SolveSession {
    pub fn open(path: &Path) -> Result<Self, MazeFileError> {
        Ok(Self { source: path.to_path_buf(), file: MazeFile::load(path)? })
    }

    pub fn from_file(source: impl Into<PathBuf>, file: MazeFile) -> Self {
        Self { source: source.into(), file }
    }

    pub fn file(&self) -> &MazeFile {
        &self.file
    }

    /// `<dir>/<stem>_<label>.json` beside the source maze.
    pub fn solution_path(&self, label: &str) -> PathBuf {
        let stem = self.source.file_stem().and_then(|s| s.to_str()).unwrap_or("maze");
        self.source.with_file_name(format!("{stem}_{label}.json"))
    }
}

impl SolverGrid for SolveSession {
    type Error = MazeFileError;

    fn is_free(&self, pos: Pos) -> bool {
        self.file.cell_at(pos).is_some_and(|cell| cell != WALL)
    }

    /// First open cell in row-major order.
    fn start(&self) -> Option<Pos> {
        self.file.open_cells().next()
    }

    /// Last open cell in row-major order.
    fn end(&self) -> Option<Pos> {
        self.file.open_cells().last()
    }

    fn mark_visited(&mut self, pos: Pos) {
        self.file.set_cell(pos, VISITED);
    }

    fn persist_solution(&mut self, label: &str) -> Result<(), Self::Error> {
        let path = self.solution_path(label);
        self.file.write_atomic(&path).map_err(MazeFileError::Io)
    }
}
