//! Team presentation metadata.
//!
//! Emoji and shade colors are rendering hints for the dispatch layer; the
//! engine itself never reads them.

use crate::core::Team;

/// How a team is drawn: its emoji and one hex color per shade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamStyle {
    pub emoji: &'static str,
    /// Colors for shades 1, 2, and 3, lightest first.
    pub shades: [&'static str; 3],
}

/// Presentation style for a team.
#[must_use]
pub const fn style_of(team: Team) -> TeamStyle {
    match team {
        Team::Blue => TeamStyle {
            emoji: "\u{1F535}",
            shades: ["#afc8ff", "#1551fe", "#1137ac"],
        },
        Team::Red => TeamStyle {
            emoji: "\u{1F534}",
            shades: ["#ffa2a2", "#ff0015", "#af1511"],
        },
        Team::Green => TeamStyle {
            emoji: "\u{1F7E2}",
            shades: ["#adffb8", "#19ff24", "#099f15"],
        },
        Team::Yellow => TeamStyle {
            emoji: "\u{1F7E1}",
            shades: ["#ffeeaa", "#ffd400", "#ccaa00"],
        },
        Team::Purple => TeamStyle {
            emoji: "\u{1F7E3}",
            shades: ["#af11af", "#ff00ff", "#ffa2ff"],
        },
        Team::Orange => TeamStyle {
            emoji: "\u{1F7E0}",
            shades: ["#af6f11", "#ff7f00", "#ffaf7f"],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_team_has_three_shades() {
        for team in Team::ALL {
            let style = style_of(team);
            assert_eq!(style.shades.len(), 3);
            assert!(style.shades.iter().all(|s| s.starts_with('#')));
        }
    }
}
