use strum_macros::Display;

use crate::{
    outcome::{GameSummary, RoundOutcome},
    review::Verdict,
    round::Round,
    team::{Player, PlayerId, Team},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EndTurnReason {
    TimeExpired,
    WordsExhausted,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PlayerAdded(Team, Player),
    PlayerRemoved(Team, PlayerId),
    PlayerMoved(PlayerId, Team, Team),
    DeckSelected(String),
    GameStarted(usize),
    RoundStarted(Round),
    TurnReady(Team, Player),
    RotationStalled(Team),
    TimerStarted(u32),
    TimerStopped(u32),
    TimerTicked(u32),
    WordJudged(String, Verdict, Team),
    TurnEnded(EndTurnReason),
    ReviewToggled(String, Verdict),
    ReviewCommitted { correct: usize, incorrect: usize },
    RoundEnded(RoundOutcome),
    GameEnded(GameSummary),
    GameReset,
}
