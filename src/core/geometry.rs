//! Grid geometry: positions, sizes, directions, and the linear cell index.
//!
//! Distances are Manhattan throughout — every range check in the game
//! (shoot, teleport, stun, heal) uses taxicab distance.
//!
//! ## Linear cell index
//!
//! Two-phase abilities identify a target cell by a single number in
//! `0..width * height`. The encoding is column-major: `index = x * height + y`,
//! matching the labels the board renderer draws.

use serde::{Deserialize, Serialize};

/// Integer cell coordinates.
///
/// Signed so that candidate-cell patterns can be built by plain offsets;
/// out-of-bounds candidates are discarded by [`GridSize::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: CellPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Create a new grid size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.width * self.height
    }

    /// Whether `pos` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(self, pos: CellPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Linear index of an in-bounds position.
    #[must_use]
    pub fn index_of(self, pos: CellPos) -> u32 {
        debug_assert!(self.contains(pos));
        pos.x as u32 * self.height + pos.y as u32
    }

    /// Decode a linear index, or `None` if it is out of range.
    #[must_use]
    pub fn pos_at(self, index: u32) -> Option<CellPos> {
        if index >= self.cell_count() {
            return None;
        }
        Some(CellPos::new(
            (index / self.height) as i32,
            (index % self.height) as i32,
        ))
    }
}

/// A movement direction, including diagonals.
///
/// Diagonal directions are only legal for pieces whose move capability has
/// the `diag` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Unit step for this direction. Up is negative y.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Whether this direction is diagonal.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan() {
        let a = CellPos::new(2, 3);
        let b = CellPos::new(5, 1);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_contains() {
        let size = GridSize::new(11, 11);
        assert!(size.contains(CellPos::new(0, 0)));
        assert!(size.contains(CellPos::new(10, 10)));
        assert!(!size.contains(CellPos::new(11, 0)));
        assert!(!size.contains(CellPos::new(-1, 5)));
    }

    #[test]
    fn test_index_round_trip() {
        let size = GridSize::new(11, 11);
        for x in 0..11 {
            for y in 0..11 {
                let pos = CellPos::new(x, y);
                let index = size.index_of(pos);
                assert_eq!(size.pos_at(index), Some(pos));
            }
        }
        assert_eq!(size.pos_at(121), None);
    }

    #[test]
    fn test_index_encoding() {
        // Column-major: index = x * height + y.
        let size = GridSize::new(11, 11);
        assert_eq!(size.index_of(CellPos::new(5, 5)), 60);
        assert_eq!(size.pos_at(60), Some(CellPos::new(5, 5)));
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::DownRight.delta(), (1, 1));
        assert!(Direction::UpLeft.is_diagonal());
        assert!(!Direction::Left.is_diagonal());
    }
}
