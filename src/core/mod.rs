//! Core building blocks: identifiers, geometry, time, RNG, and errors.
//!
//! Everything here is a small value type shared by the rest of the crate.
//! The engine never reads a wall clock or an OS RNG — callers supply a
//! [`Timestamp`] and sessions carry a seeded [`GameRng`], which keeps every
//! operation deterministic and testable.

mod error;
mod geometry;
mod ids;
mod rng;
mod team;
mod time;

pub use error::EngineError;
pub use geometry::{CellPos, Direction, GridSize};
pub use ids::{ParticipantId, SessionKey};
pub use rng::{GameRng, GameRngState};
pub use team::Team;
pub use time::{Cooldowns, DurationMs, Timestamp};
