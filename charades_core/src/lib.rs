pub use action::Action;
pub use config::GameConfig;
pub use error::GameError;
pub use event::{EndTurnReason, Event};
pub use game_state::{GameSession, Phase, TurnPhase};
pub use outcome::{GameSummary, RoundOutcome, Scores};
pub use round::Round;
pub use team::{Player, PlayerId, Team};

pub mod action;
pub mod config;
pub mod error;
pub mod event;
mod game_logic;
mod game_state;
pub mod outcome;
pub mod recorder;
pub mod review;
pub mod round;
pub mod team;
pub mod timer;
pub mod utils;
pub mod word_queue;
pub mod word_source;

/// Creates a session with both teams filled from `blue` and `red` and the deck selected.
pub fn new_session<S: word_source::WordSource + ?Sized>(
    config: GameConfig,
    source: &S,
    blue: &[&str],
    red: &[&str],
) -> Result<GameSession, GameError> {
    let mut session = GameSession::new(config);
    for name in blue {
        session.add_player(Team::Blue, name)?;
    }
    for name in red {
        session.add_player(Team::Red, name)?;
    }
    session.select_deck(source.deck_id())?;
    session.start_game(source.words())?;
    Ok(session)
}
