//! The territory grid and the paint rule.
//!
//! ## Representation
//!
//! The grid is a sparse persistent map from cell position to `(shade, team)`.
//! A cell is stored only while its shade is at least 1; an absent cell is
//! unpainted. This makes "shade 0 implies no team" true by construction, and
//! the `im` map makes cloning the whole grid O(1), which the engine relies on
//! to trial-apply an action before committing it.
//!
//! ## The paint rule
//!
//! Painting a cell for a team:
//! - unpainted, or already that team's: shade rises by 1, capped at 3, and
//!   the cell becomes (stays) that team's;
//! - another team's: shade falls by 1, and at 0 the cell becomes unpainted.
//!
//! Enemy territory therefore takes multiple applications to flip: three to
//! erase a full-shade cell, then more to build your own shade back up.

mod partition;

pub use partition::PartitionMap;

use im::HashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CellPos, Team};

/// Maximum shade of a painted cell.
pub const MAX_SHADE: u8 = 3;

/// A painted cell: its team and shade (1 to 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    pub shade: u8,
    pub team: Team,
}

/// What a single paint application did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintEffect {
    /// The cell changed: shade moved, or ownership flipped.
    Applied,
    /// Own cell already at full shade; nothing changed.
    Saturated,
}

/// The sparse territory map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryGrid {
    cells: HashMap<CellPos, CellState>,
}

impl TerritoryGrid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of a cell, or `None` if unpainted.
    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<CellState> {
        self.cells.get(&pos).copied()
    }

    /// Shade of a cell; 0 when unpainted.
    #[must_use]
    pub fn shade_at(&self, pos: CellPos) -> u8 {
        self.get(pos).map_or(0, |c| c.shade)
    }

    /// Owning team of a cell, if painted.
    #[must_use]
    pub fn team_at(&self, pos: CellPos) -> Option<Team> {
        self.get(pos).map(|c| c.team)
    }

    /// Number of painted cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is painted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells a team owns, at any shade.
    #[must_use]
    pub fn count_for(&self, team: Team) -> u32 {
        self.cells.values().filter(|c| c.team == team).count() as u32
    }

    /// Iterate over painted cells.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, CellState)> + '_ {
        self.cells.iter().map(|(&pos, &state)| (pos, state))
    }

    /// Set a cell directly, as template setup does.
    ///
    /// A zero shade removes the cell.
    pub fn set(&mut self, pos: CellPos, shade: u8, team: Team) {
        if shade == 0 {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(
                pos,
                CellState {
                    shade: shade.min(MAX_SHADE),
                    team,
                },
            );
        }
    }

    /// Apply one paint application for `team` and report what it did.
    pub fn paint(&mut self, pos: CellPos, team: Team) -> PaintEffect {
        match self.cells.get(&pos).copied() {
            None => {
                self.cells.insert(pos, CellState { shade: 1, team });
                PaintEffect::Applied
            }
            Some(cell) if cell.team == team => {
                if cell.shade >= MAX_SHADE {
                    PaintEffect::Saturated
                } else {
                    self.cells.insert(
                        pos,
                        CellState {
                            shade: cell.shade + 1,
                            team,
                        },
                    );
                    PaintEffect::Applied
                }
            }
            Some(cell) => {
                if cell.shade <= 1 {
                    self.cells.remove(&pos);
                } else {
                    self.cells.insert(
                        pos,
                        CellState {
                            shade: cell.shade - 1,
                            team: cell.team,
                        },
                    );
                }
                PaintEffect::Applied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POS: CellPos = CellPos::new(3, 4);

    #[test]
    fn test_paint_unpainted_cell() {
        let mut grid = TerritoryGrid::new();
        assert_eq!(grid.paint(POS, Team::Blue), PaintEffect::Applied);
        assert_eq!(
            grid.get(POS),
            Some(CellState {
                shade: 1,
                team: Team::Blue
            })
        );
    }

    #[test]
    fn test_shade_caps_at_three() {
        let mut grid = TerritoryGrid::new();
        for _ in 0..3 {
            assert_eq!(grid.paint(POS, Team::Blue), PaintEffect::Applied);
        }
        assert_eq!(grid.shade_at(POS), 3);
        assert_eq!(grid.paint(POS, Team::Blue), PaintEffect::Saturated);
        assert_eq!(grid.shade_at(POS), 3);
    }

    #[test]
    fn test_enemy_paint_decrements() {
        let mut grid = TerritoryGrid::new();
        grid.set(POS, 2, Team::Red);

        assert_eq!(grid.paint(POS, Team::Blue), PaintEffect::Applied);
        assert_eq!(
            grid.get(POS),
            Some(CellState {
                shade: 1,
                team: Team::Red
            })
        );

        // Second application erases the cell entirely.
        assert_eq!(grid.paint(POS, Team::Blue), PaintEffect::Applied);
        assert_eq!(grid.get(POS), None);
    }

    #[test]
    fn test_flip_takes_full_erase_first() {
        let mut grid = TerritoryGrid::new();
        grid.set(POS, 3, Team::Red);

        for _ in 0..3 {
            grid.paint(POS, Team::Blue);
        }
        assert_eq!(grid.get(POS), None);

        grid.paint(POS, Team::Blue);
        assert_eq!(grid.team_at(POS), Some(Team::Blue));
        assert_eq!(grid.shade_at(POS), 1);
    }

    #[test]
    fn test_count_for() {
        let mut grid = TerritoryGrid::new();
        grid.set(CellPos::new(0, 0), 1, Team::Blue);
        grid.set(CellPos::new(1, 0), 3, Team::Blue);
        grid.set(CellPos::new(2, 0), 2, Team::Red);
        assert_eq!(grid.count_for(Team::Blue), 2);
        assert_eq!(grid.count_for(Team::Red), 1);
        assert_eq!(grid.count_for(Team::Green), 0);
    }

    #[test]
    fn test_cheap_clone_is_independent() {
        let mut grid = TerritoryGrid::new();
        grid.set(POS, 2, Team::Red);

        let mut scratch = grid.clone();
        scratch.paint(POS, Team::Blue);

        assert_eq!(grid.shade_at(POS), 2);
        assert_eq!(scratch.shade_at(POS), 1);
    }
}
