//! Partition blocks: fixed sub-rectangles a team can capture outright.
//!
//! Partition modes carve the grid into blocks of a fixed size. A block is
//! captured when one team owns every cell in it, at any shade. Captured
//! blocks are locked: paint applications inside them are discarded before
//! they are counted.
//!
//! The map is derived from the grid on demand, never stored — the grid is
//! the single source of truth.

use crate::core::{CellPos, GridSize, Team};

use super::TerritoryGrid;

/// Capture state of every partition block, derived from a grid snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionMap {
    block_w: u32,
    block_h: u32,
    blocks_x: u32,
    blocks_y: u32,
    grid: GridSize,
    captured: Vec<Option<Team>>,
}

impl PartitionMap {
    /// Evaluate capture state for a grid partitioned into `(block_w, block_h)`
    /// blocks.
    #[must_use]
    pub fn evaluate(grid: &TerritoryGrid, size: GridSize, blocks: (u32, u32)) -> Self {
        let (block_w, block_h) = blocks;
        let blocks_x = size.width.div_ceil(block_w);
        let blocks_y = size.height.div_ceil(block_h);

        let mut map = Self {
            block_w,
            block_h,
            blocks_x,
            blocks_y,
            grid: size,
            captured: vec![None; (blocks_x * blocks_y) as usize],
        };

        for by in 0..blocks_y {
            for bx in 0..blocks_x {
                map.captured[(by * blocks_x + bx) as usize] = map.dominator(grid, bx, by);
            }
        }
        map
    }

    /// The team owning every cell of block `(bx, by)`, if any.
    ///
    /// Capture requires all `block_w * block_h` cells, so a partial block at
    /// the grid edge can never be captured.
    fn dominator(&self, grid: &TerritoryGrid, bx: u32, by: u32) -> Option<Team> {
        let x0 = (bx * self.block_w) as i32;
        let y0 = (by * self.block_h) as i32;
        let mut owner: Option<Team> = None;

        for dx in 0..self.block_w as i32 {
            for dy in 0..self.block_h as i32 {
                let pos = CellPos::new(x0 + dx, y0 + dy);
                if !self.grid.contains(pos) {
                    return None;
                }
                match (owner, grid.team_at(pos)) {
                    (_, None) => return None,
                    (None, Some(team)) => owner = Some(team),
                    (Some(current), Some(team)) if current != team => return None,
                    _ => {}
                }
            }
        }
        owner
    }

    /// Which block contains `pos`.
    fn block_of(&self, pos: CellPos) -> Option<(u32, u32)> {
        if !self.grid.contains(pos) {
            return None;
        }
        Some((pos.x as u32 / self.block_w, pos.y as u32 / self.block_h))
    }

    /// Whether `pos` lies inside a captured block.
    #[must_use]
    pub fn is_locked(&self, pos: CellPos) -> bool {
        self.block_of(pos)
            .is_some_and(|(bx, by)| self.captured_by(bx, by).is_some())
    }

    /// The team that captured block `(bx, by)`, if any.
    #[must_use]
    pub fn captured_by(&self, bx: u32, by: u32) -> Option<Team> {
        self.captured
            .get((by * self.blocks_x + bx) as usize)
            .copied()
            .flatten()
    }

    /// Number of blocks a team has captured.
    #[must_use]
    pub fn count_for(&self, team: Team) -> u32 {
        self.captured.iter().filter(|&&c| c == Some(team)).count() as u32
    }

    /// Block grid dimensions `(blocks_x, blocks_y)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.blocks_x, self.blocks_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_block(grid: &mut TerritoryGrid, x0: i32, y0: i32, team: Team) {
        for dx in 0..4 {
            for dy in 0..4 {
                grid.set(CellPos::new(x0 + dx, y0 + dy), 1, team);
            }
        }
    }

    #[test]
    fn test_empty_grid_has_no_captures() {
        let grid = TerritoryGrid::new();
        let map = PartitionMap::evaluate(&grid, GridSize::new(12, 12), (4, 4));
        assert_eq!(map.dimensions(), (3, 3));
        for team in Team::ALL {
            assert_eq!(map.count_for(team), 0);
        }
        assert!(!map.is_locked(CellPos::new(0, 0)));
    }

    #[test]
    fn test_full_domination_captures() {
        let mut grid = TerritoryGrid::new();
        fill_block(&mut grid, 0, 0, Team::Blue);

        let map = PartitionMap::evaluate(&grid, GridSize::new(12, 12), (4, 4));
        assert_eq!(map.captured_by(0, 0), Some(Team::Blue));
        assert_eq!(map.count_for(Team::Blue), 1);
        assert!(map.is_locked(CellPos::new(3, 3)));
        assert!(!map.is_locked(CellPos::new(4, 3)));
    }

    #[test]
    fn test_one_missing_cell_blocks_capture() {
        let mut grid = TerritoryGrid::new();
        fill_block(&mut grid, 0, 0, Team::Blue);
        grid.set(CellPos::new(2, 2), 0, Team::Blue);

        let map = PartitionMap::evaluate(&grid, GridSize::new(12, 12), (4, 4));
        assert_eq!(map.captured_by(0, 0), None);
    }

    #[test]
    fn test_mixed_ownership_blocks_capture() {
        let mut grid = TerritoryGrid::new();
        fill_block(&mut grid, 0, 0, Team::Blue);
        grid.set(CellPos::new(1, 1), 2, Team::Red);

        let map = PartitionMap::evaluate(&grid, GridSize::new(12, 12), (4, 4));
        assert_eq!(map.captured_by(0, 0), None);
        assert!(!map.is_locked(CellPos::new(0, 0)));
    }

    #[test]
    fn test_partial_edge_block_is_never_captured() {
        // A 10-wide grid leaves the rightmost 4x4 blocks only 2 cells wide.
        let mut grid = TerritoryGrid::new();
        for x in 8..10 {
            for y in 0..4 {
                grid.set(CellPos::new(x, y), 1, Team::Blue);
            }
        }
        fill_block(&mut grid, 0, 0, Team::Blue);

        let map = PartitionMap::evaluate(&grid, GridSize::new(10, 10), (4, 4));
        assert_eq!(map.captured_by(0, 0), Some(Team::Blue));
        assert_eq!(map.captured_by(2, 0), None);
        assert!(!map.is_locked(CellPos::new(9, 0)));
    }

    #[test]
    fn test_shade_is_irrelevant_to_capture() {
        let mut grid = TerritoryGrid::new();
        for dx in 0..4 {
            for dy in 0..4 {
                let shade = 1 + ((dx + dy) % 3) as u8;
                grid.set(CellPos::new(4 + dx, 4 + dy), shade, Team::Green);
            }
        }
        let map = PartitionMap::evaluate(&grid, GridSize::new(12, 12), (4, 4));
        assert_eq!(map.captured_by(1, 1), Some(Team::Green));
    }
}
