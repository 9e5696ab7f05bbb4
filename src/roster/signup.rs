//! Signup assignment: which unclaimed piece a joining participant gets.
//!
//! ## Fairness ordering
//!
//! Teams are ranked by their unclaimed-to-total fraction, highest first, so
//! the most depleted team gets the next player when no usable preference
//! applies. Ties keep catalog order.
//!
//! ## Preference cascade
//!
//! First match wins:
//! 1. preferred team has an unclaimed piece of the preferred role;
//! 2. preferred team has any unclaimed piece (role unavailable);
//! 3. preferred role is unclaimed on the fairness-best team (team
//!    unavailable);
//! 4. preferred role is unclaimed anywhere (team unavailable);
//! 5. any unclaimed piece on the fairness-best team (nothing honored).
//!
//! Steps 2, 4, and 5 pick uniformly at random among the candidates.

use crate::catalog::PieceKind;
use crate::core::{GameRng, ParticipantId, Team};

use super::Roster;

/// What a joining participant asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignupPreferences {
    pub team: Option<Team>,
    pub role: Option<PieceKind>,
}

/// How well the preferences were honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferenceNote {
    /// Every stated preference was satisfied (including none stated).
    Honored,
    /// Placed on the preferred team, but not in the preferred role.
    RoleUnavailable,
    /// Placed in the preferred role, but not on the preferred team.
    TeamUnavailable,
    /// Neither stated preference could be satisfied.
    NothingHonored,
}

/// Result of a successful assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignupOutcome {
    pub team: Team,
    pub kind: PieceKind,
    pub note: PreferenceNote,
    /// Whether this assignment claimed the last open piece.
    pub roster_filled: bool,
}

/// Teams ordered by unclaimed fraction, most depleted first.
///
/// The sort is stable, so teams tied on fraction keep catalog order.
fn fairness_order(roster: &Roster) -> Vec<Team> {
    let mut teams: Vec<(Team, u32, u32)> = Vec::new();
    for piece in &roster.pieces {
        match teams.iter_mut().find(|(t, _, _)| *t == piece.team) {
            Some((_, unclaimed, total)) => {
                *total += 1;
                if piece.owner.is_none() {
                    *unclaimed += 1;
                }
            }
            None => {
                let unclaimed = u32::from(piece.owner.is_none());
                teams.push((piece.team, unclaimed, 1));
            }
        }
    }
    // Compare fractions without floats: a/b > c/d  <=>  a*d > c*b.
    teams.sort_by(|&(_, a, b), &(_, c, d)| (c * b).cmp(&(a * d)));
    teams.into_iter().map(|(team, _, _)| team).collect()
}

fn unclaimed_indices(
    roster: &Roster,
    team: Option<Team>,
    role: Option<PieceKind>,
) -> Vec<usize> {
    roster
        .pieces
        .iter()
        .enumerate()
        .filter(|(_, p)| p.owner.is_none())
        .filter(|(_, p)| team.map_or(true, |t| p.team == t))
        .filter(|(_, p)| role.map_or(true, |r| p.kind == r))
        .map(|(i, _)| i)
        .collect()
}

/// Pick and claim a piece for `participant`.
///
/// Returns `None` when no unclaimed piece exists. Callers check the
/// already-signed-up and game-active preconditions first.
pub fn assign(
    roster: &mut Roster,
    participant: ParticipantId,
    prefs: SignupPreferences,
    rng: &mut GameRng,
) -> Option<SignupOutcome> {
    if roster.is_full() || roster.pieces.is_empty() {
        return None;
    }

    let order = fairness_order(roster);
    let best_team = order
        .iter()
        .copied()
        .find(|&t| !unclaimed_indices(roster, Some(t), None).is_empty());

    let (index, note) = pick(roster, prefs, best_team, rng);
    let piece = &mut roster.pieces[index];
    piece.owner = Some(participant);
    let team = piece.team;
    let kind = piece.kind;

    Some(SignupOutcome {
        team,
        kind,
        note,
        roster_filled: roster.is_full(),
    })
}

fn pick(
    roster: &Roster,
    prefs: SignupPreferences,
    best_team: Option<Team>,
    rng: &mut GameRng,
) -> (usize, PreferenceNote) {
    if let Some(team) = prefs.team {
        if let Some(role) = prefs.role {
            let exact = unclaimed_indices(roster, Some(team), Some(role));
            if let Some(&index) = exact.first() {
                return (index, PreferenceNote::Honored);
            }
        }
        let on_team = unclaimed_indices(roster, Some(team), None);
        if let Some(&index) = rng.choose(&on_team) {
            let note = if prefs.role.is_some() {
                PreferenceNote::RoleUnavailable
            } else {
                PreferenceNote::Honored
            };
            return (index, note);
        }
    }

    if let Some(role) = prefs.role {
        if let Some(best) = best_team {
            let on_best = unclaimed_indices(roster, Some(best), Some(role));
            if let Some(&index) = on_best.first() {
                let note = if prefs.team.is_some() {
                    PreferenceNote::TeamUnavailable
                } else {
                    PreferenceNote::Honored
                };
                return (index, note);
            }
        }
        let anywhere = unclaimed_indices(roster, None, Some(role));
        if let Some(&index) = rng.choose(&anywhere) {
            let note = if prefs.team.is_some() {
                PreferenceNote::TeamUnavailable
            } else {
                PreferenceNote::Honored
            };
            return (index, note);
        }
    }

    let fallback = unclaimed_indices(roster, best_team, None);
    let index = *rng
        .choose(&fallback)
        .unwrap_or_else(|| unreachable!("assign checked the roster is not full"));
    let note = if prefs.team.is_some() || prefs.role.is_some() {
        PreferenceNote::NothingHonored
    } else {
        PreferenceNote::Honored
    };
    (index, note)
}
