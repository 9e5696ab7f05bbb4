//! Ability and move resolution.
//!
//! ## Validation before mutation
//!
//! Every operation validates completely before touching the session. For
//! abilities that can fizzle (zero affected cells), the paints are applied to
//! a scratch clone of the grid — an O(1) copy thanks to the persistent map —
//! and the clone replaces the real grid only on success. A rejected action
//! leaves the session byte-for-byte unchanged and charges no cooldown.
//!
//! ## Affected-cell accounting
//!
//! A paint application counts as "affected" unless it hit the actor's own
//! cell already at full shade. Out-of-bounds candidates and cells inside a
//! locked partition block are discarded before they are counted.

mod menu;
mod movement;
mod targeted;
mod win;

pub use menu::{
    eligible_targets, prompt_menu, resolve_heal, resolve_stun, HealReport, MenuKind, MenuTarget,
    StunReport, HEAL_IMMUNITY, HEAL_RANGE, STUN_RANGE,
};
pub use movement::{move_piece, MoveReport};
pub use targeted::{
    prompt_target, resolve_shoot, resolve_teleport, ShotReport, TargetKind, TargetPromptData,
    TeleportReport,
};
pub use win::{evaluate_win, WinDetail, WinReport, PARTITION_WIN};

use smallvec::{smallvec, SmallVec};

use crate::catalog::AbilityKind;
use crate::core::{CellPos, EngineError, GridSize, ParticipantId, Timestamp};
use crate::grid::{PaintEffect, PartitionMap, TerritoryGrid};
use crate::roster::Piece;
use crate::session::Session;

/// Outcome of an immediate (splash or bucket) ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImmediateReport {
    /// Cells the ability affected.
    pub cells: u32,
    /// When the actor may act again.
    pub cooldown_until: Timestamp,
}

/// Index of the piece `actor` controls, requiring an active game.
pub(crate) fn actor_index(session: &Session, actor: ParticipantId) -> Result<usize, EngineError> {
    if !session.active || session.config.is_none() {
        return Err(EngineError::NotActive);
    }
    session
        .roster
        .index_of(actor)
        .ok_or(EngineError::NotParticipant)
}

/// Reject if the piece is on cooldown or stunned.
pub(crate) fn check_ready(piece: &Piece, now: Timestamp) -> Result<(), EngineError> {
    if let Some(remaining) = piece.cooldowns.action_remaining(now) {
        return Err(EngineError::CooldownActive { remaining });
    }
    if let Some(remaining) = piece.cooldowns.stunned_remaining(now) {
        return Err(EngineError::Stunned { remaining });
    }
    Ok(())
}

/// Full common precondition check: active game, membership, readiness.
pub(crate) fn validate_actor(
    session: &Session,
    actor: ParticipantId,
    now: Timestamp,
) -> Result<usize, EngineError> {
    let index = actor_index(session, actor)?;
    check_ready(&session.roster.pieces[index], now)?;
    Ok(index)
}

/// Reject unless the piece has the ability.
pub(crate) fn require_ability(piece: &Piece, kind: AbilityKind) -> Result<(), EngineError> {
    if piece.abilities.has(kind) {
        Ok(())
    } else {
        Err(EngineError::MissingAbility(kind))
    }
}

/// The splash pattern: one application to each orthogonal neighbor.
pub(crate) fn splash_cells(center: CellPos) -> SmallVec<[CellPos; 4]> {
    smallvec![
        center.offset(-1, 0),
        center.offset(1, 0),
        center.offset(0, -1),
        center.offset(0, 1),
    ]
}

/// The bucket pattern, as a multiset of applications.
///
/// The cross is painted twice, the center three times, plus one application
/// to each diagonal neighbor and each range-2 orthogonal cell — 19 in all,
/// concentrated near the piece.
pub(crate) fn bucket_cells(center: CellPos) -> SmallVec<[CellPos; 19]> {
    let mut cells: SmallVec<[CellPos; 19]> = splash_cells(center).into_iter().collect();
    cells.extend([
        center,
        center,
        center,
        center.offset(-1, 0),
        center.offset(1, 0),
        center.offset(0, -1),
        center.offset(0, 1),
        center.offset(-1, -1),
        center.offset(1, 1),
        center.offset(-1, 1),
        center.offset(1, -1),
        center.offset(-2, 0),
        center.offset(2, 0),
        center.offset(0, -2),
        center.offset(0, 2),
    ]);
    cells
}

/// Apply paint applications, skipping out-of-bounds and locked cells.
///
/// Returns the affected count: applications that survived the filters and
/// were not saturated no-ops.
pub(crate) fn apply_paints(
    grid: &mut TerritoryGrid,
    size: GridSize,
    locks: Option<&PartitionMap>,
    team: crate::core::Team,
    cells: &[CellPos],
) -> u32 {
    let mut affected = 0;
    for &pos in cells {
        if !size.contains(pos) {
            continue;
        }
        if locks.is_some_and(|l| l.is_locked(pos)) {
            continue;
        }
        if grid.paint(pos, team) == PaintEffect::Applied {
            affected += 1;
        }
    }
    affected
}

/// Charge the action cooldown and reset the consecutive-stun counter.
///
/// Returns the cooldown expiry, for the reminder the caller schedules.
pub(crate) fn finish_action(session: &mut Session, index: usize, now: Timestamp) -> Timestamp {
    let piece = &mut session.roster.pieces[index];
    let until = now.plus(session.cooldown.times(piece.abilities.cooldown_multiplier));
    piece.cooldowns.action = Some(until);
    piece.consecutive_stuns = 0;
    until
}

/// Resolve a splash or bucket.
pub fn resolve_immediate(
    session: &mut Session,
    actor: ParticipantId,
    kind: AbilityKind,
    now: Timestamp,
) -> Result<ImmediateReport, EngineError> {
    debug_assert!(matches!(kind, AbilityKind::Splash | AbilityKind::Bucket));

    let index = validate_actor(session, actor, now)?;
    let piece = &session.roster.pieces[index];
    require_ability(piece, kind)?;

    let cells: SmallVec<[CellPos; 19]> = match kind {
        AbilityKind::Splash => splash_cells(piece.pos).into_iter().collect(),
        _ => bucket_cells(piece.pos),
    };

    let size = session
        .config
        .as_ref()
        .map(|c| c.grid)
        .ok_or(EngineError::NotActive)?;
    let locks = session.partition_map();
    let team = piece.team;

    let mut scratch = session.grid.clone();
    let affected = apply_paints(&mut scratch, size, locks.as_ref(), team, &cells);
    if affected == 0 {
        return Err(EngineError::NoEffect);
    }

    session.grid = scratch;
    let cooldown_until = finish_action(session, index, now);
    Ok(ImmediateReport {
        cells: affected,
        cooldown_until,
    })
}
