//! Ability capability sets.
//!
//! Every piece type carries an [`AbilitySet`]: the fixed collection of
//! capabilities the catalog grants it. Capabilities are data, not behavior —
//! the engine modules interpret them.

use serde::{Deserialize, Serialize};

use crate::core::DurationMs;

/// The abilities a piece can be asked to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    /// Paint the four orthogonal neighbors once each.
    Splash,
    /// The heavy multi-application pattern around the piece.
    Bucket,
    /// Two-phase ranged paint.
    Shoot,
    /// Two-phase relocation with a single paint at the destination.
    Teleport,
    /// Disable an enemy piece for a while.
    Stun,
    /// Clear an ally's stun and grant immunity.
    Heal,
}

impl AbilityKind {
    /// Lowercase name, matching the command the dispatch layer exposes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AbilityKind::Splash => "splash",
            AbilityKind::Bucket => "bucket",
            AbilityKind::Shoot => "shoot",
            AbilityKind::Teleport => "teleport",
            AbilityKind::Stun => "stun",
            AbilityKind::Heal => "heal",
        }
    }
}

impl std::fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of a shoot capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootSpec {
    /// Maximum Manhattan distance to the target cell.
    pub range: u32,
    /// How many times the target cell is painted.
    pub strength: u32,
    /// Whether the shot also paints the target's orthogonal neighbors once.
    pub splash: bool,
}

/// Parameters of a move capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    /// Maximum cells per move.
    pub speed: u32,
    /// Whether diagonal directions are legal.
    pub diag: bool,
    /// How many times each traversed cell is painted.
    pub strength: u32,
    /// An immobile piece cannot move at all.
    pub immobile: bool,
}

impl Default for MoveSpec {
    fn default() -> Self {
        Self {
            speed: 1,
            diag: false,
            strength: 1,
            immobile: false,
        }
    }
}

/// Parameters of a stun capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StunSpec {
    /// How long the target stays stunned.
    pub duration: DurationMs,
}

/// The full capability set of one piece type.
///
/// Pieces without an explicit move capability still get the default one
/// (speed 1, orthogonal only) — every piece can move unless its catalog
/// entry marks it immobile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySet {
    /// Three-letter label the board renderer draws on the piece.
    pub display_name: String,
    /// Scales the action cooldown applied after each move or ability.
    pub cooldown_multiplier: u32,
    pub splash: bool,
    pub bucket: bool,
    pub heal: bool,
    pub shoot: Option<ShootSpec>,
    /// Teleport range, when present.
    pub teleport: Option<u32>,
    pub stun: Option<StunSpec>,
    /// Explicit move capability; `None` means the default.
    pub movement: Option<MoveSpec>,
}

impl AbilitySet {
    /// An ability set with only the default move capability.
    #[must_use]
    pub fn named(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            cooldown_multiplier: 1,
            splash: false,
            bucket: false,
            heal: false,
            shoot: None,
            teleport: None,
            stun: None,
            movement: None,
        }
    }

    #[must_use]
    pub fn with_splash(mut self) -> Self {
        self.splash = true;
        self
    }

    #[must_use]
    pub fn with_bucket(mut self) -> Self {
        self.bucket = true;
        self
    }

    #[must_use]
    pub fn with_heal(mut self) -> Self {
        self.heal = true;
        self
    }

    #[must_use]
    pub fn with_shoot(mut self, spec: ShootSpec) -> Self {
        self.shoot = Some(spec);
        self
    }

    #[must_use]
    pub fn with_teleport(mut self, range: u32) -> Self {
        self.teleport = Some(range);
        self
    }

    #[must_use]
    pub fn with_stun(mut self, duration: DurationMs) -> Self {
        self.stun = Some(StunSpec { duration });
        self
    }

    #[must_use]
    pub fn with_movement(mut self, spec: MoveSpec) -> Self {
        self.movement = Some(spec);
        self
    }

    #[must_use]
    pub fn with_cooldown_multiplier(mut self, factor: u32) -> Self {
        self.cooldown_multiplier = factor;
        self
    }

    /// Whether this set grants the given ability.
    #[must_use]
    pub fn has(&self, kind: AbilityKind) -> bool {
        match kind {
            AbilityKind::Splash => self.splash,
            AbilityKind::Bucket => self.bucket,
            AbilityKind::Heal => self.heal,
            AbilityKind::Shoot => self.shoot.is_some(),
            AbilityKind::Teleport => self.teleport.is_some(),
            AbilityKind::Stun => self.stun.is_some(),
        }
    }

    /// The effective move capability, defaulting where the catalog is silent.
    #[must_use]
    pub fn move_spec(&self) -> MoveSpec {
        self.movement.unwrap_or_default()
    }
}
