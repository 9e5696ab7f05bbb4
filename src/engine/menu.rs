//! Menu abilities: stun and heal.
//!
//! Both present a list of pieces in range and resolve a selection later.
//! Like the targeted abilities, resolution re-validates everything against
//! fresh state: the eligible set is recomputed, and a selection that no
//! longer qualifies is rejected as stale rather than applied blindly.

use crate::catalog::AbilityKind;
use crate::core::{DurationMs, EngineError, ParticipantId, Team, Timestamp};
use crate::session::Session;

use super::{finish_action, require_ability, validate_actor};

/// Stun reaches further than heal.
pub const STUN_RANGE: u32 = 4;
pub const HEAL_RANGE: u32 = 3;

/// Stun immunity granted by a heal.
pub const HEAL_IMMUNITY: DurationMs = DurationMs::from_minutes(150);

/// Which menu ability is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Stun,
    Heal,
}

impl MenuKind {
    pub(crate) const fn ability(self) -> AbilityKind {
        match self {
            MenuKind::Stun => AbilityKind::Stun,
            MenuKind::Heal => AbilityKind::Heal,
        }
    }

    const fn range(self) -> u32 {
        match self {
            MenuKind::Stun => STUN_RANGE,
            MenuKind::Heal => HEAL_RANGE,
        }
    }
}

/// One selectable piece in the prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuTarget {
    pub participant: ParticipantId,
    pub team: Team,
}

/// Outcome of a resolved stun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StunReport {
    pub target: ParticipantId,
    /// When the target's stun wears off, for the reminder.
    pub stunned_until: Timestamp,
    pub cooldown_until: Timestamp,
}

/// Outcome of a resolved heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealReport {
    pub target: ParticipantId,
    pub immune_until: Timestamp,
    pub cooldown_until: Timestamp,
}

/// Claimed pieces the actor could target right now.
///
/// Stun targets any enemy piece in range; heal targets an ally whose stun is
/// still active.
pub fn eligible_targets(
    session: &Session,
    actor_index: usize,
    kind: MenuKind,
    now: Timestamp,
) -> Vec<MenuTarget> {
    let actor = &session.roster.pieces[actor_index];
    session
        .roster
        .pieces
        .iter()
        .filter(|p| p.pos.manhattan(actor.pos) <= kind.range())
        .filter(|p| match kind {
            MenuKind::Stun => p.team != actor.team,
            MenuKind::Heal => {
                p.team == actor.team && p.cooldowns.stunned_remaining(now).is_some()
            }
        })
        .filter_map(|p| {
            p.owner.map(|participant| MenuTarget {
                participant,
                team: p.team,
            })
        })
        .collect()
}

fn check_stun_counter(session: &Session, index: usize, kind: MenuKind) -> Result<(), EngineError> {
    if kind == MenuKind::Stun && session.roster.pieces[index].consecutive_stuns >= 2 {
        return Err(EngineError::ConsecutiveStunLimit);
    }
    Ok(())
}

/// Phase 1: validate and list the eligible targets.
///
/// An empty list is a rejection — no cooldown is charged for an ability
/// with nobody to aim at.
pub fn prompt_menu(
    session: &Session,
    actor: ParticipantId,
    kind: MenuKind,
    now: Timestamp,
) -> Result<Vec<MenuTarget>, EngineError> {
    let index = validate_actor(session, actor, now)?;
    require_ability(&session.roster.pieces[index], kind.ability())?;
    check_stun_counter(session, index, kind)?;

    let targets = eligible_targets(session, index, kind, now);
    if targets.is_empty() {
        return Err(EngineError::NoTargetsInRange);
    }
    Ok(targets)
}

fn revalidate_selection(
    session: &Session,
    actor: ParticipantId,
    target: ParticipantId,
    kind: MenuKind,
    now: Timestamp,
) -> Result<(usize, usize), EngineError> {
    let index = validate_actor(session, actor, now)?;
    require_ability(&session.roster.pieces[index], kind.ability())?;
    check_stun_counter(session, index, kind)?;

    let still_eligible = eligible_targets(session, index, kind, now)
        .iter()
        .any(|t| t.participant == target);
    if !still_eligible {
        return Err(EngineError::StaleSelection);
    }
    let target_index = session
        .roster
        .index_of(target)
        .ok_or(EngineError::StaleSelection)?;
    Ok((index, target_index))
}

/// Phase 2 of stun: disable the selected enemy.
pub fn resolve_stun(
    session: &mut Session,
    actor: ParticipantId,
    target: ParticipantId,
    now: Timestamp,
) -> Result<StunReport, EngineError> {
    let (index, target_index) =
        revalidate_selection(session, actor, target, MenuKind::Stun, now)?;

    if let Some(remaining) = session.roster.pieces[target_index]
        .cooldowns
        .immunity_remaining(now)
    {
        return Err(EngineError::TargetImmune { remaining });
    }

    let duration = session.roster.pieces[index]
        .abilities
        .stun
        .ok_or(EngineError::MissingAbility(AbilityKind::Stun))?
        .duration;

    let stunned_until = now.plus(duration);
    session.roster.pieces[target_index].cooldowns.stunned = Some(stunned_until);

    let cooldown_until = finish_action(session, index, now);
    // finish_action resets the counter; a stun instead advances it.
    session.roster.pieces[index].consecutive_stuns =
        session.roster.pieces[index].consecutive_stuns.saturating_add(1);

    Ok(StunReport {
        target,
        stunned_until,
        cooldown_until,
    })
}

/// Phase 2 of heal: clear the ally's stun and grant immunity.
pub fn resolve_heal(
    session: &mut Session,
    actor: ParticipantId,
    target: ParticipantId,
    now: Timestamp,
) -> Result<HealReport, EngineError> {
    let (index, target_index) =
        revalidate_selection(session, actor, target, MenuKind::Heal, now)?;

    let immune_until = now.plus(HEAL_IMMUNITY);
    let target_piece = &mut session.roster.pieces[target_index];
    target_piece.cooldowns.stunned = None;
    target_piece.cooldowns.immunity = Some(immune_until);

    let cooldown_until = finish_action(session, index, now);
    Ok(HealReport {
        target,
        immune_until,
        cooldown_until,
    })
}
