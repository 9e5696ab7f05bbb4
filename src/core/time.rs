//! Time values and the piece cooldown set.
//!
//! All times are plain unix-millisecond integers. The engine never reads a
//! clock: every operation takes an explicit `now`, so replays and tests are
//! deterministic. A cooldown is a future point in time after which it no
//! longer applies — `None` and a past timestamp are equivalent.

use serde::{Deserialize, Serialize};

/// A point in time, unix milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Create from unix milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Raw unix milliseconds.
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// This timestamp advanced by a duration.
    #[must_use]
    pub const fn plus(self, duration: DurationMs) -> Self {
        Self(self.0 + duration.0)
    }

    /// Whether this timestamp lies strictly after `other`.
    #[must_use]
    pub const fn is_after(self, other: Timestamp) -> bool {
        self.0 > other.0
    }

    /// Duration from `earlier` to `self`, clamped to zero.
    #[must_use]
    pub fn since(self, earlier: Timestamp) -> DurationMs {
        DurationMs((self.0 - earlier.0).max(0))
    }
}

/// A span of time, milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DurationMs(pub i64);

impl DurationMs {
    /// Zero duration.
    pub const ZERO: DurationMs = DurationMs(0);

    /// Create from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Create from seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1_000)
    }

    /// Create from minutes.
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * 60_000)
    }

    /// Raw milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// This duration scaled by an integer factor.
    #[must_use]
    pub const fn times(self, factor: u32) -> Self {
        Self(self.0 * factor as i64)
    }
}

impl std::fmt::Display for DurationMs {
    /// Renders as minutes and seconds, e.g. `45m 0s` or `12s`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_secs = self.0.max(0) / 1_000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        if minutes > 0 {
            write!(f, "{minutes}m {seconds}s")
        } else {
            write!(f, "{seconds}s")
        }
    }
}

/// The three cooldown timers a piece carries.
///
/// Each is an optional expiry timestamp. A timer is *active* while its expiry
/// lies in the future; an absent or elapsed timer does not apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldowns {
    /// Blocks moves and abilities until it expires.
    pub action: Option<Timestamp>,
    /// Blocks moves and abilities; set by an enemy stun, cleared by heal.
    pub stunned: Option<Timestamp>,
    /// Rejects incoming stuns; granted by heal.
    pub immunity: Option<Timestamp>,
}

fn remaining(expiry: Option<Timestamp>, now: Timestamp) -> Option<DurationMs> {
    match expiry {
        Some(at) if at.is_after(now) => Some(at.since(now)),
        _ => None,
    }
}

impl Cooldowns {
    /// Time left on the action cooldown, if it is active.
    #[must_use]
    pub fn action_remaining(&self, now: Timestamp) -> Option<DurationMs> {
        remaining(self.action, now)
    }

    /// Time left on the stun, if it is active.
    #[must_use]
    pub fn stunned_remaining(&self, now: Timestamp) -> Option<DurationMs> {
        remaining(self.stunned, now)
    }

    /// Time left on stun immunity, if it is active.
    #[must_use]
    pub fn immunity_remaining(&self, now: Timestamp) -> Option<DurationMs> {
        remaining(self.immunity, now)
    }

    /// Whether the piece can act (no action cooldown, not stunned).
    #[must_use]
    pub fn clear(&self, now: Timestamp) -> bool {
        self.action_remaining(now).is_none() && self.stunned_remaining(now).is_none()
    }
}
