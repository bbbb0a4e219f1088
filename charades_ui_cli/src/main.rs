use std::{error::Error, fs, io, path::Path};

use charades_core::{
    word_source::{Deck, WordSource},
    GameSession,
};
use cli_game::CliGame;
use config::CliConfig;
use file_recorder::FileRecorder;
use log::info;

mod cli_game;
mod config;
mod file_recorder;

fn load_deck(path: Option<&Path>) -> io::Result<Deck> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom");
            Ok(Deck::from_lines(id, &text))
        }
        None => Ok(Deck::default_deck()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("Usage: [DECK_FILE]");
    let config = CliConfig::load();
    let deck = load_deck(config.deck_path.as_deref())?;
    info!(
        "Deck '{}' with {} words, {}s turns",
        deck.deck_id(),
        deck.words().len(),
        config.game.turn_seconds
    );

    let mut session = GameSession::new(config.game.clone());
    session.select_deck(deck.deck_id())?;
    let recorder = FileRecorder::new(config.history_path.clone());
    CliGame::new(session).run(deck.words(), &recorder).await
}
