//! # splash-engine
//!
//! A turn-paced territory game engine for chat servers: pieces on a grid
//! paint cells for their team, and the first team to hold enough territory
//! wins.
//!
//! ## Design Principles
//!
//! 1. **Pure Over Platform**: The engine never talks to a chat API, a
//!    database, or a clock. Callers pass `now` in and get reports out;
//!    persistence and timers go through the [`store`] traits.
//!
//! 2. **Whole-Value State**: A [`session::Session`] is one serializable
//!    value. Operations read it, mutate a copy, and write it back — there is
//!    no partial update to get out of sync.
//!
//! 3. **Validation Before Mutation**: Every rejected action leaves the
//!    session untouched and charges no cooldown. Fizzle-prone abilities
//!    trial-apply against an O(1) grid clone via `im`.
//!
//! ## Modules
//!
//! - `core`: ids, teams, geometry, time, RNG, errors
//! - `catalog`: static game modes, piece kinds, ability sets, team styling
//! - `grid`: the sparse territory grid and partition capture
//! - `roster`: pieces, claims, and signup fairness
//! - `session`: the per-server game value
//! - `engine`: ability and move resolution, win evaluation
//! - `profile`: per-participant preferences and statistics
//! - `store`: persistence and scheduling contracts, in-memory test doubles
//! - `service`: the orchestrator tying all of the above to user commands

pub mod catalog;
pub mod core;
pub mod engine;
pub mod grid;
pub mod profile;
pub mod roster;
pub mod service;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    CellPos, Direction, DurationMs, EngineError, GameRng, GameRngState, GridSize, ParticipantId,
    SessionKey, Team, Timestamp,
};

pub use crate::catalog::{AbilityKind, AbilitySet, Catalog, GameMode, GameTemplate, PieceKind};

pub use crate::grid::{PartitionMap, TerritoryGrid, MAX_SHADE};

pub use crate::roster::{Piece, PreferenceNote, Roster, SignupOutcome, SignupPreferences};

pub use crate::session::{Session, DEFAULT_COOLDOWN};

pub use crate::engine::{WinDetail, WinReport, PARTITION_WIN};

pub use crate::profile::{Profile, Statistics};

pub use crate::store::{
    MemoryStore, RecordingScheduler, ScheduledTask, Scheduler, Store, StoreError,
};

pub use crate::service::{
    AbilityOutcome, ActionDetail, ActionReport, CooldownStatus, SelectPrompt, SessionService,
    TargetPrompt, TaskOutcome, MIN_PLAYERS, REPLY_WINDOW,
};
