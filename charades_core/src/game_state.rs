use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::GameConfig,
    event::{EndTurnReason, Event},
    outcome::{GameSummary, RoundOutcome, Scores},
    review::Review,
    round::Round,
    team::{Player, Roster, Team},
    timer::TurnTimer,
    word_queue::WordQueue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress(Round),
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Timer reset to the full duration, waiting for the player to start it.
    Ready,
    Playing,
    Over(EndTurnReason),
}

/// One game from team setup to the final summary. All mutation goes through
/// [`GameSession::apply`].
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) roster: Roster,
    pub(crate) phase: Phase,
    pub(crate) turn: TurnPhase,
    pub(crate) scores: Scores,
    pub(crate) current_team: Team,
    pub(crate) current_player_index: usize,
    pub(crate) queue: WordQueue,
    pub(crate) timer: TurnTimer,
    pub(crate) review: Review,
    pub(crate) round_correct: Vec<String>,
    pub(crate) round_incorrect: Vec<String>,
    pub(crate) round_closed: bool,
    pub(crate) rotation_stalled: bool,
    pub(crate) history: Vec<RoundOutcome>,
    pub(crate) deck_id: Option<String>,
    pub(crate) summary: Option<GameSummary>,
    pub(crate) rng: StdRng,
    pub(crate) log: Vec<Event>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameSession {
            timer: TurnTimer::new(config.turn_seconds),
            config,
            roster: Roster::new(),
            phase: Phase::NotStarted,
            turn: TurnPhase::Ready,
            scores: Scores::default(),
            current_team: Team::Blue,
            current_player_index: 0,
            queue: WordQueue::default(),
            review: Review::new(),
            round_correct: vec![],
            round_incorrect: vec![],
            round_closed: false,
            rotation_stalled: false,
            history: vec![],
            deck_id: None,
            summary: None,
            rng,
            log: vec![],
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> TurnPhase {
        self.turn
    }

    pub fn round(&self) -> Option<Round> {
        match self.phase {
            Phase::InProgress(round) => Some(round),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self.phase, Phase::InProgress(_))
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores.get(team)
    }

    pub fn current_team(&self) -> Team {
        self.current_team
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.roster
            .players(self.current_team)
            .get(self.current_player_index)
    }

    pub fn current_word(&self) -> Option<&String> {
        match self.turn {
            TurnPhase::Playing => self.queue.current(),
            _ => None,
        }
    }

    pub fn queue(&self) -> &WordQueue {
        &self.queue
    }

    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    pub fn review(&self) -> &Review {
        &self.review
    }

    /// Committed words of the running round.
    pub fn round_correct(&self) -> &[String] {
        &self.round_correct
    }

    pub fn round_incorrect(&self) -> &[String] {
        &self.round_incorrect
    }

    /// Words judged this round, committed or still under review.
    pub fn round_judged(&self) -> usize {
        self.round_correct.len() + self.round_incorrect.len() + self.review.len()
    }

    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    pub fn deck_id(&self) -> Option<&String> {
        self.deck_id.as_ref()
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// The round can be ended: every word has been judged or no team is able to play.
    pub fn is_round_complete(&self) -> bool {
        self.is_in_progress() && (self.queue.is_exhausted() || self.rotation_stalled)
    }

    /// The last round has been recorded and only ending the game remains.
    pub fn is_awaiting_end(&self) -> bool {
        self.is_in_progress() && self.round_closed
    }
}
