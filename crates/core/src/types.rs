use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, direction: Direction, steps: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy * steps, x: self.x + dx * steps }
    }

    /// Cell exactly halfway between two positions on the same row or column.
    pub fn midpoint(self, other: Pos) -> Self {
        Self { y: (self.y + other.y) / 2, x: (self.x + other.x) / 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellState {
    Wall,
    Open,
}

/// Exploration directions in draw order: a uniform draw in `0..4` maps onto this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    PlusX,
    PlusY,
    MinusX,
    MinusY,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::PlusX, Direction::PlusY, Direction::MinusX, Direction::MinusY];

    pub fn from_draw(draw: u32) -> Self {
        Self::ALL[(draw % 4) as usize]
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::PlusX => (1, 0),
            Self::PlusY => (0, 1),
            Self::MinusX => (-1, 0),
            Self::MinusY => (0, -1),
        }
    }

    fn flag(self) -> u8 {
        match self {
            Self::PlusX => 0b0001,
            Self::PlusY => 0b0010,
            Self::MinusX => 0b0100,
            Self::MinusY => 0b1000,
        }
    }
}

/// Directions a room has not tried yet. Starts full and only ever shrinks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn full() -> Self {
        Self(0b1111)
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.flag() != 0
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.flag();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&direction| self.contains(direction))
    }
}

impl Default for DirectionSet {
    fn default() -> Self {
        Self::full()
    }
}

/// Stable index of a room inside the builder's fixed-size arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(pub usize);
