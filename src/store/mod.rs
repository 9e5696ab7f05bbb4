//! Persistence and scheduling collaborator contracts.
//!
//! The engine never talks to a database or a timer wheel directly. It reads
//! a whole [`Session`] or [`Profile`], mutates a copy, and writes the whole
//! value back; follow-up work is handed to a [`Scheduler`] as a
//! [`ScheduledTask`] carrying the session generation it was registered
//! under.
//!
//! [`MemoryStore`] and [`RecordingScheduler`] are the in-process
//! implementations the tests run against; a deployment supplies its own.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ParticipantId, SessionKey, Timestamp};
use crate::profile::Profile;
use crate::session::Session;

/// A persistence failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A value failed to encode or decode.
    #[error("codec failure: {0}")]
    Codec(String),
    /// The backing store itself failed.
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Whole-value persistence for sessions and profiles.
pub trait Store {
    fn get_session(&self, key: SessionKey) -> Result<Option<Session>, StoreError>;
    fn put_session(&mut self, key: SessionKey, session: &Session) -> Result<(), StoreError>;
    fn has_session(&self, key: SessionKey) -> Result<bool, StoreError>;
    fn get_profile(&self, id: ParticipantId) -> Result<Option<Profile>, StoreError>;
    fn put_profile(&mut self, id: ParticipantId, profile: &Profile) -> Result<(), StoreError>;
}

/// A fire-once callback registered against a wall-clock time.
///
/// Tasks carry the generation current when they were registered; the
/// handler compares it against the persisted session and suppresses stale
/// tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledTask {
    /// Notify a participant that their action cooldown has expired.
    CooldownReminder {
        key: SessionKey,
        participant: ParticipantId,
        generation: u64,
    },
    /// Check whether a filled-up game should start.
    AutoStart { key: SessionKey, generation: u64 },
}

/// Registers fire-once callbacks.
pub trait Scheduler {
    fn schedule_at(&mut self, at: Timestamp, task: ScheduledTask);
}

/// In-memory store backed by serialized bytes.
///
/// Values are held encoded, so every read is a full decode — the same
/// whole-value round-trip a real backend performs. That keeps "it worked in
/// memory but not against the database" bugs out of the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: FxHashMap<u64, Vec<u8>>,
    profiles: FxHashMap<u64, Vec<u8>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}

impl Store for MemoryStore {
    fn get_session(&self, key: SessionKey) -> Result<Option<Session>, StoreError> {
        self.sessions.get(&key.0).map(|b| decode(b)).transpose()
    }

    fn put_session(&mut self, key: SessionKey, session: &Session) -> Result<(), StoreError> {
        self.sessions.insert(key.0, encode(session)?);
        Ok(())
    }

    fn has_session(&self, key: SessionKey) -> Result<bool, StoreError> {
        Ok(self.sessions.contains_key(&key.0))
    }

    fn get_profile(&self, id: ParticipantId) -> Result<Option<Profile>, StoreError> {
        self.profiles.get(&id.0).map(|b| decode(b)).transpose()
    }

    fn put_profile(&mut self, id: ParticipantId, profile: &Profile) -> Result<(), StoreError> {
        self.profiles.insert(id.0, encode(profile)?);
        Ok(())
    }
}

/// Scheduler that records registrations instead of firing them.
///
/// Tests drain the recorded tasks and feed them back through the task
/// handler at whatever simulated time they choose.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub scheduled: Vec<(Timestamp, ScheduledTask)>,
}

impl RecordingScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything scheduled so far.
    pub fn drain(&mut self) -> Vec<(Timestamp, ScheduledTask)> {
        std::mem::take(&mut self.scheduled)
    }
}

impl Scheduler for RecordingScheduler {
    fn schedule_at(&mut self, at: Timestamp, task: ScheduledTask) {
        self.scheduled.push((at, task));
    }
}
