//! Errors returned when an intent cannot be applied to a session.
//!
//! Every error leaves the session exactly as it was before the call.

use crate::{round::Round, team::Team};

/// The caller supplied input the game cannot accept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("player name must not be empty")]
    EmptyPlayerName,

    #[error("a player named '{0}' already exists")]
    DuplicatePlayerName(String),

    #[error("team {0} needs at least one player")]
    EmptyTeam(Team),

    #[error("the deck contains no words")]
    NoWords,

    #[error("'{got}' is not the word being presented (expected '{expected}')")]
    WordNotPresented { expected: String, got: String },

    #[error("'{0}' is not awaiting review")]
    NotUnderReview(String),

    #[error("there is no reviewed word at position {0}")]
    NoReviewEntry(usize),
}

/// The intent is not valid in the current lifecycle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("no game is in progress")]
    GameNotInProgress,

    #[error("a game is already in progress")]
    GameInProgress,

    #[error("no turn is being played")]
    NoActiveTurn,

    #[error("the current turn is still being played")]
    TurnInProgress,

    #[error("the timer is already running")]
    TimerRunning,

    #[error("round {} has already ended", .0.number())]
    RoundAlreadyEnded(Round),

    #[error("player {0} is not on team {1}")]
    UnknownPlayer(String, Team),

    #[error("player is already on team {0}")]
    SameTeam(Team),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid state: {0}")]
    State(#[from] StateError),
}
