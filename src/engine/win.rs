//! Win evaluation.
//!
//! Checked after every successful gameplay mutation. Threshold modes win on
//! owned-cell count; partition modes win on captured blocks.

use crate::core::Team;
use crate::session::Session;

/// Blocks a team must capture to win a partition mode.
pub const PARTITION_WIN: u32 = 4;

/// How the game was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinDetail {
    /// Owned-cell count reached the mode's threshold.
    Threshold { cells: u32, total: u32 },
    /// Enough partition blocks captured.
    Partitions { blocks: u32 },
}

/// A finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinReport {
    pub team: Team,
    pub detail: WinDetail,
}

/// Whether any team has won the current game.
#[must_use]
pub fn evaluate_win(session: &Session) -> Option<WinReport> {
    let template = session.config.as_ref()?;

    if let Some(win) = template.win {
        let total = template.grid.cell_count();
        for setup in &template.teams {
            let cells = session.grid.count_for(setup.team);
            if cells >= win {
                return Some(WinReport {
                    team: setup.team,
                    detail: WinDetail::Threshold { cells, total },
                });
            }
        }
        return None;
    }

    let map = session.partition_map()?;
    for setup in &template.teams {
        let blocks = map.count_for(setup.team);
        if blocks >= PARTITION_WIN {
            return Some(WinReport {
                team: setup.team,
                detail: WinDetail::Partitions { blocks },
            });
        }
    }
    None
}
