//! Per-server session state.
//!
//! One session exists per chat server. It owns the active game template,
//! the territory grid, and the roster; persistence writes are whole-session
//! replacements, so every field here is plain serializable data.
//!
//! ## Generation token
//!
//! Scheduled callbacks (cooldown reminders, auto-start checks) capture the
//! session's `generation` when registered and compare it on firing. Any
//! rebuild or reset bumps the generation, so a stale callback can never act
//! on a session that was since recreated.

use serde::{Deserialize, Serialize};

use crate::catalog::{abilities_of, Catalog, GameTemplate};
use crate::core::{DurationMs, GameRngState, Timestamp};
use crate::grid::{PartitionMap, TerritoryGrid};
use crate::roster::{Piece, Roster};

/// Default action cooldown applied to new sessions.
pub const DEFAULT_COOLDOWN: DurationMs = DurationMs::from_minutes(45);

/// One chat server's game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The active game's template; `None` until `/create`.
    pub config: Option<GameTemplate>,
    pub grid: TerritoryGrid,
    pub roster: Roster,
    /// Whether participants may still join.
    pub signups_open: bool,
    /// Base action cooldown, scaled per piece by its multiplier.
    pub cooldown: DurationMs,
    /// When the game started, once it has.
    pub started: Option<Timestamp>,
    /// True between start and win; locks signups and enables gameplay.
    pub active: bool,
    /// Bumped on every rebuild or reset; see the module docs.
    pub generation: u64,
    pub rng: GameRngState,
}

impl Session {
    /// A fresh session with no game.
    #[must_use]
    pub fn empty(seed: u64) -> Self {
        Self {
            config: None,
            grid: TerritoryGrid::new(),
            roster: Roster::default(),
            signups_open: true,
            cooldown: DEFAULT_COOLDOWN,
            started: None,
            active: false,
            generation: 0,
            rng: crate::core::GameRng::new(seed).state(),
        }
    }

    /// Replace the game wholesale from a template.
    ///
    /// Builds the starting grid and an unclaimed roster, discards any
    /// previous game, and bumps the generation.
    pub fn rebuild(
        &mut self,
        template: GameTemplate,
        signups_open: bool,
        cooldown: Option<DurationMs>,
    ) {
        let mut grid = TerritoryGrid::new();
        let mut pieces = Vec::new();
        for setup in &template.teams {
            for cell in &setup.cells {
                grid.set(cell.pos, cell.shade, setup.team);
            }
            for start in &setup.pieces {
                pieces.push(Piece::new(
                    start.kind,
                    setup.team,
                    start.pos,
                    abilities_of(start.kind),
                ));
            }
        }

        self.config = Some(template);
        self.grid = grid;
        self.roster = Roster { pieces };
        self.signups_open = signups_open;
        if let Some(cooldown) = cooldown {
            self.cooldown = cooldown;
        }
        self.started = None;
        self.active = false;
        self.generation += 1;
    }

    /// Clear the game after a win, keeping the session itself.
    pub fn reset(&mut self) {
        self.config = None;
        self.grid = TerritoryGrid::new();
        self.roster = Roster::default();
        self.signups_open = true;
        self.cooldown = DEFAULT_COOLDOWN;
        self.started = None;
        self.active = false;
        self.generation += 1;
    }

    /// The partition map for the current grid, when the mode has partitions.
    #[must_use]
    pub fn partition_map(&self) -> Option<PartitionMap> {
        let template = self.config.as_ref()?;
        let blocks = template.partitions?;
        Some(PartitionMap::evaluate(&self.grid, template.grid, blocks))
    }

    /// Rebuild this session's game from the catalog by mode.
    pub fn create_from(
        &mut self,
        catalog: &Catalog,
        mode: crate::catalog::GameMode,
        signups_open: bool,
        cooldown: Option<DurationMs>,
    ) {
        self.rebuild(catalog.template(mode).clone(), signups_open, cooldown);
    }
}
