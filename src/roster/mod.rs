//! Pieces and the roster.
//!
//! The roster is the full set of pieces in the current game, claimed or not.
//! A participant controls at most one piece; ownership is by participant id,
//! never display name.

mod signup;

pub use signup::{assign, PreferenceNote, SignupOutcome, SignupPreferences};

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilitySet, PieceKind};
use crate::core::{CellPos, Cooldowns, ParticipantId, Team};

/// One piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub team: Team,
    pub pos: CellPos,
    /// The participant controlling this piece, once claimed.
    pub owner: Option<ParticipantId>,
    pub abilities: AbilitySet,
    pub cooldowns: Cooldowns,
    /// Stuns this piece has performed with no other action in between.
    pub consecutive_stuns: u32,
}

impl Piece {
    /// A fresh unclaimed piece.
    #[must_use]
    pub fn new(kind: PieceKind, team: Team, pos: CellPos, abilities: AbilitySet) -> Self {
        Self {
            kind,
            team,
            pos,
            owner: None,
            abilities,
            cooldowns: Cooldowns::default(),
            consecutive_stuns: 0,
        }
    }
}

/// All pieces in the current game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub pieces: Vec<Piece>,
}

impl Roster {
    /// Index of the piece a participant controls.
    #[must_use]
    pub fn index_of(&self, participant: ParticipantId) -> Option<usize> {
        self.pieces.iter().position(|p| p.owner == Some(participant))
    }

    /// The piece a participant controls.
    #[must_use]
    pub fn piece_of(&self, participant: ParticipantId) -> Option<&Piece> {
        self.index_of(participant).map(|i| &self.pieces[i])
    }

    /// Mutable access to the piece a participant controls.
    pub fn piece_of_mut(&mut self, participant: ParticipantId) -> Option<&mut Piece> {
        let index = self.index_of(participant)?;
        Some(&mut self.pieces[index])
    }

    /// Number of claimed pieces.
    #[must_use]
    pub fn claimed_count(&self) -> u32 {
        self.pieces.iter().filter(|p| p.owner.is_some()).count() as u32
    }

    /// Whether every piece is claimed.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pieces.iter().all(|p| p.owner.is_some())
    }

    /// Whether any piece occupies `pos`.
    #[must_use]
    pub fn occupied(&self, pos: CellPos) -> bool {
        self.pieces.iter().any(|p| p.pos == pos)
    }

    /// The piece at `pos`, if any.
    #[must_use]
    pub fn piece_at(&self, pos: CellPos) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.pos == pos)
    }

    /// Iterate over unclaimed pieces.
    pub fn unclaimed(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.owner.is_none())
    }

    /// Release a participant's piece back to the unclaimed pool.
    ///
    /// Returns `true` if the participant had a piece.
    pub fn unclaim(&mut self, participant: ParticipantId) -> bool {
        match self.piece_of_mut(participant) {
            Some(piece) => {
                piece.owner = None;
                true
            }
            None => false,
        }
    }

    /// Owners of every claimed piece.
    #[must_use]
    pub fn owners(&self) -> Vec<ParticipantId> {
        self.pieces.iter().filter_map(|p| p.owner).collect()
    }
}
