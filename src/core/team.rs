//! Team identity.
//!
//! Teams are a closed set because the static catalog defines every game mode
//! up front. Visual metadata (emoji, color shades) lives in the catalog, not
//! here.

use serde::{Deserialize, Serialize};

/// One of the six playable teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Team {
    /// All teams, in catalog order.
    pub const ALL: [Team; 6] = [
        Team::Blue,
        Team::Red,
        Team::Green,
        Team::Yellow,
        Team::Purple,
        Team::Orange,
    ];

    /// Lowercase team name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
            Team::Green => "green",
            Team::Yellow => "yellow",
            Team::Purple => "purple",
            Team::Orange => "orange",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
