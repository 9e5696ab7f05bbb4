//! The engine error type.
//!
//! Every fallible operation returns `Result<_, EngineError>`. Rule rejections
//! are ordinary values here, not panics: the dispatch layer turns them into
//! user-facing replies. The display strings carry enough detail (remaining
//! cooldowns, limits) for that layer to render without re-deriving state.

use thiserror::Error;

use crate::catalog::AbilityKind;
use crate::core::DurationMs;
use crate::store::StoreError;

/// Any way a game operation can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// No game has been created in this session.
    #[error("no game has been created")]
    NoGame,

    /// The game exists but has not started.
    #[error("the game has not started")]
    NotActive,

    /// A game is already running.
    #[error("a game is already in progress")]
    AlreadyActive,

    /// Signups are closed.
    #[error("signups are closed")]
    SignupsClosed,

    /// The caller controls no piece in the current game.
    #[error("you are not playing in this game")]
    NotParticipant,

    /// The caller already controls a piece.
    #[error("you have already signed up")]
    AlreadySignedUp,

    /// Every piece is claimed.
    #[error("the game is full")]
    RosterFull,

    /// An admin placement targeted a piece that is already claimed.
    #[error("that position is already taken")]
    PositionUnavailable,

    /// Too few players to start.
    #[error("at least {minimum} players are needed to start")]
    TooFewPlayers { minimum: u32 },

    /// The actor's action cooldown has not expired.
    #[error("on cooldown for {remaining}")]
    CooldownActive { remaining: DurationMs },

    /// The actor is stunned.
    #[error("stunned for {remaining}")]
    Stunned { remaining: DurationMs },

    /// The actor's piece lacks the requested ability.
    #[error("this piece cannot use {0}")]
    MissingAbility(AbilityKind),

    /// The actor already stunned twice in a row.
    #[error("cannot stun a third time in a row")]
    ConsecutiveStunLimit,

    /// The action would change nothing on the board.
    #[error("that would have no effect")]
    NoEffect,

    /// A menu ability found nothing to target.
    #[error("no valid targets in range")]
    NoTargetsInRange,

    /// A target selection named an option that does not exist.
    #[error("invalid target")]
    InvalidTargetIndex,

    /// A chosen cell lies beyond the ability's range.
    #[error("target is {distance} away, range is {max}")]
    TargetOutOfRange { distance: u32, max: u32 },

    /// A chosen cell is occupied by a piece.
    #[error("target cell is occupied")]
    TargetOccupied,

    /// A stun target is immune.
    #[error("target is immune for {remaining}")]
    TargetImmune { remaining: DurationMs },

    /// A pending selection refers to state that no longer holds.
    #[error("that selection is no longer valid")]
    StaleSelection,

    /// The piece cannot move at all.
    #[error("this piece cannot move")]
    Immobile,

    /// A move asked for more distance than the piece's speed allows.
    #[error("this piece moves at most {max} cells")]
    ExceedsSpeed { max: u32 },

    /// A diagonal move on a piece without diagonal movement.
    #[error("this piece cannot move diagonally")]
    InvalidDirection,

    /// A position fell outside the grid.
    #[error("out of bounds")]
    OutOfBounds,

    /// The game changed between a prompt and its reply.
    #[error("the game has changed, try again")]
    SessionChanged,

    /// A prompt's reply window elapsed.
    #[error("too slow, try again")]
    Expired,

    /// A nickname was not exactly three alphanumeric characters.
    #[error("nickname must be exactly 3 letters or digits")]
    InvalidNickname,

    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
