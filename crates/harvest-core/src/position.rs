use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grid cell. `y` grows southwards, matching the engine's screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `max(|dx|, |dy|)`, the number of 8-directional steps between two cells.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx.max(dy).min(u64::from(u32::MAX)) as u32
    }

    /// True for the 8 cells surrounding `self` (a cell is not adjacent to itself).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.chebyshev_distance(other) == 1
    }

    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The 8 surrounding cells in [`Direction::ALL`] order. Cells may lie off the map.
    pub fn adjacent_positions(self) -> [Position; 8] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Compass direction of `other` as seen from `self`; `None` for the same cell.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        let dx = (other.x - self.x).signum();
        let dy = (other.y - self.y).signum();
        Direction::from_offset(dx, dy)
    }

    /// The cell adjacent to `target` that is nearest to `self`, restricted to the map.
    ///
    /// Ties keep the first cell in [`Direction::ALL`] order.
    pub fn closest_adjacent_to(self, target: Position, extents: MapExtents) -> Option<Position> {
        let mut best: Option<(u32, Position)> = None;
        for cell in target.adjacent_positions() {
            if !extents.contains(cell) {
                continue;
            }
            let distance = self.chebyshev_distance(cell);
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, cell)),
            }
        }
        best.map(|(_, cell)| cell)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Map size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapExtents {
    pub width: i32,
    pub height: i32,
}

impl MapExtents {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// The larger side of the map; an upper bound on any in-map Chebyshev distance.
    pub fn span(self) -> u32 {
        self.width.max(self.height).max(0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Fixed order for determinism: clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| d.offset() == (dx.signum(), dy.signum()))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::NorthEast => "NorthEast",
            Direction::East => "East",
            Direction::SouthEast => "SouthEast",
            Direction::South => "South",
            Direction::SouthWest => "SouthWest",
            Direction::West => "West",
            Direction::NorthWest => "NorthWest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
