//! Piece movement.
//!
//! A move is a straight line: a direction and a distance up to the piece's
//! speed. Every traversed cell (not the starting one) is painted once per
//! point of move strength, except cells inside a locked partition block.
//! Movement itself is never blocked by locks — only by the grid edge and by
//! claimed pieces.

use crate::core::{CellPos, Direction, EngineError, ParticipantId, Timestamp};
use crate::session::Session;

use super::{actor_index, check_ready, finish_action};

/// Outcome of a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub direction: Direction,
    pub distance: u32,
    pub destination: CellPos,
    pub cooldown_until: Timestamp,
}

/// Move the actor's piece, painting the path.
pub fn move_piece(
    session: &mut Session,
    actor: ParticipantId,
    direction: Direction,
    distance: u32,
    now: Timestamp,
) -> Result<MoveReport, EngineError> {
    let index = actor_index(session, actor)?;
    let piece = &session.roster.pieces[index];
    let spec = piece.abilities.move_spec();

    if spec.immobile {
        return Err(EngineError::Immobile);
    }
    check_ready(piece, now)?;

    if distance > spec.speed {
        return Err(EngineError::ExceedsSpeed { max: spec.speed });
    }
    if direction.is_diagonal() && !spec.diag {
        return Err(EngineError::InvalidDirection);
    }

    let size = session
        .config
        .as_ref()
        .map(|c| c.grid)
        .ok_or(EngineError::NotActive)?;
    let (dx, dy) = direction.delta();
    let start = piece.pos;
    let destination = start.offset(dx * distance as i32, dy * distance as i32);
    if !size.contains(destination) {
        return Err(EngineError::OutOfBounds);
    }

    // A zero-distance move lands on the actor's own piece and is rejected
    // here along with any other claimed occupant.
    let blocked = session
        .roster
        .pieces
        .iter()
        .any(|p| p.pos == destination && p.owner.is_some());
    if blocked {
        return Err(EngineError::TargetOccupied);
    }

    let team = piece.team;
    let strength = spec.strength.max(1);
    let locks = session.partition_map();

    for step in 1..=distance as i32 {
        let pos = start.offset(dx * step, dy * step);
        if locks.as_ref().is_some_and(|l| l.is_locked(pos)) {
            continue;
        }
        for _ in 0..strength {
            session.grid.paint(pos, team);
        }
    }

    session.roster.pieces[index].pos = destination;
    let cooldown_until = finish_action(session, index, now);
    Ok(MoveReport {
        direction,
        distance,
        destination,
        cooldown_until,
    })
}
