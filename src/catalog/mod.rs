//! The static game catalog: modes, piece types, and team styles.
//!
//! Everything here is fixed data compiled into the binary. Sessions copy
//! from the catalog when a game is created and never write back to it.

mod abilities;
mod games;
mod teams;

pub use abilities::{AbilityKind, AbilitySet, MoveSpec, ShootSpec, StunSpec};
pub use games::{
    template_of, GameMode, GameTemplate, PieceKind, StartingCell, StartingPiece, TeamSetup,
};
pub use teams::{style_of, TeamStyle};

use rustc_hash::FxHashMap;

use crate::core::{DurationMs, Team};

/// Capability set for a piece type.
#[must_use]
pub fn abilities_of(kind: PieceKind) -> AbilitySet {
    match kind {
        PieceKind::Colorer => AbilitySet::named("CLR").with_splash(),
        PieceKind::Leader => AbilitySet::named("LDR")
            .with_shoot(ShootSpec {
                range: 4,
                strength: 2,
                splash: false,
            })
            .with_stun(DurationMs::from_minutes(210)),
        PieceKind::Car => AbilitySet::named("CAR").with_movement(MoveSpec {
            speed: 2,
            ..MoveSpec::default()
        }),
        PieceKind::Painter => AbilitySet::named("PNT").with_movement(MoveSpec {
            strength: 3,
            diag: true,
            ..MoveSpec::default()
        }),
        PieceKind::Overlord => AbilitySet::named("OVR")
            .with_shoot(ShootSpec {
                range: 4,
                strength: 2,
                splash: false,
            })
            .with_stun(DurationMs::from_minutes(180))
            .with_movement(MoveSpec {
                immobile: true,
                ..MoveSpec::default()
            })
            .with_teleport(3)
            .with_cooldown_multiplier(2),
        PieceKind::Bucketeer => AbilitySet::named("BKT")
            .with_movement(MoveSpec {
                diag: true,
                ..MoveSpec::default()
            })
            .with_bucket(),
        PieceKind::Shooter => AbilitySet::named("SHR").with_shoot(ShootSpec {
            range: 3,
            strength: 1,
            splash: true,
        }),
        PieceKind::Medic => AbilitySet::named("MED").with_heal(),
    }
}

/// Lookup tables over the built-in catalog.
///
/// Templates are built once and cached; ability sets are cheap enough to
/// build on demand but cached alongside for uniform access.
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: FxHashMap<GameMode, GameTemplate>,
}

impl Catalog {
    /// The full built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let templates = GameMode::ALL
            .into_iter()
            .map(|mode| (mode, template_of(mode)))
            .collect();
        Self { templates }
    }

    /// Template for a mode.
    #[must_use]
    pub fn template(&self, mode: GameMode) -> &GameTemplate {
        &self.templates[&mode]
    }

    /// Capability set for a piece type.
    #[must_use]
    pub fn abilities(&self, kind: PieceKind) -> AbilitySet {
        abilities_of(kind)
    }

    /// Presentation style for a team.
    #[must_use]
    pub fn style(&self, team: Team) -> TeamStyle {
        style_of(team)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_modes() {
        let catalog = Catalog::builtin();
        for mode in GameMode::ALL {
            assert_eq!(catalog.template(mode).mode, mode);
        }
    }

    #[test]
    fn test_overlord_abilities() {
        let set = abilities_of(PieceKind::Overlord);
        assert_eq!(set.cooldown_multiplier, 2);
        assert_eq!(set.teleport, Some(3));
        assert!(set.move_spec().immobile);
        assert_eq!(
            set.stun.map(|s| s.duration),
            Some(DurationMs::from_minutes(180))
        );
    }

    #[test]
    fn test_shooter_splash_shot() {
        let set = abilities_of(PieceKind::Shooter);
        let shoot = set.shoot.unwrap();
        assert_eq!(shoot.range, 3);
        assert_eq!(shoot.strength, 1);
        assert!(shoot.splash);
    }
}
