//! Two-phase targeted abilities: shoot and teleport.
//!
//! Phase 1 validates the actor and hands back prompt data (center, range,
//! index bound) for the dispatch layer to show. Phase 2 runs later against
//! whatever the session looks like *then*: every precondition is re-checked
//! from scratch, so a session that changed during the reply window produces
//! a clean rejection instead of acting on stale state.

use crate::catalog::AbilityKind;
use crate::core::{CellPos, EngineError, ParticipantId, Timestamp};
use crate::session::Session;

use super::{
    apply_paints, finish_action, require_ability, splash_cells, validate_actor,
};

/// Which two-phase targeted ability is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Shoot,
    Teleport,
}

impl TargetKind {
    pub(crate) const fn ability(self) -> AbilityKind {
        match self {
            TargetKind::Shoot => AbilityKind::Shoot,
            TargetKind::Teleport => AbilityKind::Teleport,
        }
    }
}

/// Phase-1 data for rendering the target prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetPromptData {
    /// The actor's position at prompt time, for the range overlay.
    pub center: CellPos,
    /// Maximum Manhattan distance.
    pub range: u32,
    /// Largest valid linear cell index.
    pub max_index: u32,
}

/// Outcome of a resolved shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotReport {
    pub target: CellPos,
    pub cells: u32,
    pub cooldown_until: Timestamp,
}

/// Outcome of a resolved teleport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeleportReport {
    pub destination: CellPos,
    pub distance: u32,
    pub cooldown_until: Timestamp,
}

fn range_of(session: &Session, index: usize, kind: TargetKind) -> Result<u32, EngineError> {
    let piece = &session.roster.pieces[index];
    require_ability(piece, kind.ability())?;
    Ok(match kind {
        TargetKind::Shoot => piece.abilities.shoot.map(|s| s.range).unwrap_or(0),
        TargetKind::Teleport => piece.abilities.teleport.unwrap_or(0),
    })
}

/// Phase 1: validate and describe the prompt.
pub fn prompt_target(
    session: &Session,
    actor: ParticipantId,
    kind: TargetKind,
    now: Timestamp,
) -> Result<TargetPromptData, EngineError> {
    let index = validate_actor(session, actor, now)?;
    let range = range_of(session, index, kind)?;
    let size = session
        .config
        .as_ref()
        .map(|c| c.grid)
        .ok_or(EngineError::NotActive)?;

    Ok(TargetPromptData {
        center: session.roster.pieces[index].pos,
        range,
        max_index: size.cell_count() - 1,
    })
}

/// Decode and range-check a chosen cell against fresh state.
fn resolve_target_cell(
    session: &Session,
    index: usize,
    kind: TargetKind,
    cell_index: u32,
) -> Result<(CellPos, u32), EngineError> {
    let size = session
        .config
        .as_ref()
        .map(|c| c.grid)
        .ok_or(EngineError::NotActive)?;
    let target = size
        .pos_at(cell_index)
        .ok_or(EngineError::InvalidTargetIndex)?;

    let piece = &session.roster.pieces[index];
    let max = range_of(session, index, kind)?;
    let distance = piece.pos.manhattan(target);
    if distance > max {
        return Err(EngineError::TargetOutOfRange { distance, max });
    }

    // Only claimed pieces block a cell; an abandoned piece is scenery.
    let blocked = session
        .roster
        .pieces
        .iter()
        .any(|p| p.pos == target && p.owner.is_some());
    if blocked {
        return Err(EngineError::TargetOccupied);
    }

    Ok((target, distance))
}

/// Phase 2 of shoot: re-validate everything, then paint the target cell.
///
/// The target cell takes one application per point of shot strength; a
/// splashing shot also paints the target's orthogonal neighbors once each.
pub fn resolve_shoot(
    session: &mut Session,
    actor: ParticipantId,
    cell_index: u32,
    now: Timestamp,
) -> Result<ShotReport, EngineError> {
    let index = validate_actor(session, actor, now)?;
    let (target, _) = resolve_target_cell(session, index, TargetKind::Shoot, cell_index)?;

    let piece = &session.roster.pieces[index];
    let spec = piece
        .abilities
        .shoot
        .ok_or(EngineError::MissingAbility(AbilityKind::Shoot))?;
    let team = piece.team;

    let mut cells: Vec<CellPos> = std::iter::repeat(target)
        .take(spec.strength.max(1) as usize)
        .collect();
    if spec.splash {
        cells.extend(splash_cells(target));
    }

    let size = session
        .config
        .as_ref()
        .map(|c| c.grid)
        .ok_or(EngineError::NotActive)?;
    let locks = session.partition_map();

    let mut scratch = session.grid.clone();
    let affected = apply_paints(&mut scratch, size, locks.as_ref(), team, &cells);
    if affected == 0 {
        return Err(EngineError::NoEffect);
    }

    session.grid = scratch;
    let cooldown_until = finish_action(session, index, now);
    Ok(ShotReport {
        target,
        cells: affected,
        cooldown_until,
    })
}

/// Phase 2 of teleport: re-validate, relocate, and paint the destination.
///
/// The destination takes a single paint application, suppressed when it lies
/// in a locked block; the relocation itself always goes through, so a
/// teleport never fizzles for lack of effect.
pub fn resolve_teleport(
    session: &mut Session,
    actor: ParticipantId,
    cell_index: u32,
    now: Timestamp,
) -> Result<TeleportReport, EngineError> {
    let index = validate_actor(session, actor, now)?;
    let (target, distance) =
        resolve_target_cell(session, index, TargetKind::Teleport, cell_index)?;

    let team = session.roster.pieces[index].team;
    let locked = session
        .partition_map()
        .is_some_and(|l| l.is_locked(target));
    if !locked {
        session.grid.paint(target, team);
    }

    session.roster.pieces[index].pos = target;
    let cooldown_until = finish_action(session, index, now);
    Ok(TeleportReport {
        destination: target,
        distance,
        cooldown_until,
    })
}
