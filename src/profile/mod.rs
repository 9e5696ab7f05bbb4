//! Cross-session participant profiles.
//!
//! A profile persists across games and servers: nickname, notification
//! preference, and cumulative statistics. Profiles never hold game state.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Timestamp};

/// Cumulative per-participant statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub joined: Timestamp,
    pub last_active: Timestamp,
    pub games_played: u32,
    pub games_won: u32,
    /// Successful moves and abilities, of any kind.
    pub actions_taken: u32,
    /// Successful ability uses, excluding teleports.
    pub abilities_used: u32,
}

impl Statistics {
    /// Fresh statistics for a participant first seen at `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            joined: now,
            last_active: now,
            games_played: 0,
            games_won: 0,
            actions_taken: 0,
            abilities_used: 0,
        }
    }
}

/// One participant's persistent record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display nickname: exactly 3 alphanumeric characters, stored uppercase.
    pub nickname: Option<String>,
    /// Whether to notify this participant when their cooldown expires.
    pub cooldown_ping: bool,
    pub stats: Statistics,
}

impl Profile {
    /// A fresh profile for a participant first seen at `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            nickname: None,
            cooldown_ping: false,
            stats: Statistics::new(now),
        }
    }

    /// Record activity at `now`.
    pub fn touch(&mut self, now: Timestamp) {
        self.stats.last_active = now;
    }

    /// Set the nickname, validating and uppercasing it.
    pub fn set_nickname(&mut self, nickname: &str) -> Result<(), EngineError> {
        if nickname.chars().count() != 3 || !nickname.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::InvalidNickname);
        }
        self.nickname = Some(nickname.to_ascii_uppercase());
        Ok(())
    }

    /// Remove the nickname.
    pub fn clear_nickname(&mut self) {
        self.nickname = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_validation() {
        let mut profile = Profile::new(Timestamp::from_millis(0));

        profile.set_nickname("ab1").unwrap();
        assert_eq!(profile.nickname.as_deref(), Some("AB1"));

        assert_eq!(
            profile.set_nickname("abcd"),
            Err(EngineError::InvalidNickname)
        );
        assert_eq!(profile.set_nickname("a!"), Err(EngineError::InvalidNickname));
        assert_eq!(profile.set_nickname(""), Err(EngineError::InvalidNickname));
        // Failed updates leave the previous nickname in place.
        assert_eq!(profile.nickname.as_deref(), Some("AB1"));

        profile.clear_nickname();
        assert_eq!(profile.nickname, None);
    }

    #[test]
    fn test_touch_updates_last_active() {
        let start = Timestamp::from_millis(1_000);
        let mut profile = Profile::new(start);
        let later = Timestamp::from_millis(5_000);

        profile.touch(later);
        assert_eq!(profile.stats.last_active, later);
        assert_eq!(profile.stats.joined, start);
    }
}
