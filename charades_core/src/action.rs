use crate::{
    team::{PlayerId, Team},
    timer::TimerToken,
};

/// Every intent the presentation layer can send to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddPlayer(Team, String),
    RemovePlayer(Team, PlayerId),
    MovePlayer(PlayerId, Team, Team),
    SelectDeck(String),
    StartGame(Vec<String>),
    StartTimer,
    StopTimer,
    Tick(TimerToken),
    MarkCorrect(String),
    MarkIncorrect(String),
    ToggleReview(String),
    /// Flips the review entry at a position, for decks with repeated words.
    ToggleReviewAt(usize),
    CommitReview,
    AdvanceTurn,
    EndRound,
    EndGame,
    ResetGame,
}
