use std::path::PathBuf;

use charades_core::GameConfig;
use log::warn;

static DEFAULT_HISTORY_PATH: &str = "charades_history.jsonl";

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub deck_path: Option<PathBuf>,
    pub history_path: PathBuf,
    pub game: GameConfig,
}

impl CliConfig {
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        CliConfig::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// `args` are the positional arguments (`[DECK_FILE]`); `env` looks up overrides.
    pub fn from_sources<F>(args: &[String], env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut game = GameConfig::default();
        if let Some(value) = env("CHARADES_TURN_SECONDS") {
            match value.parse::<u32>() {
                Ok(seconds) if seconds > 0 => game.turn_seconds = seconds,
                _ => warn!("Ignoring CHARADES_TURN_SECONDS={}", value),
            }
        }
        if let Some(value) = env("CHARADES_SEED") {
            match value.parse::<u64>() {
                Ok(seed) => game.seed = Some(seed),
                Err(_) => warn!("Ignoring CHARADES_SEED={}", value),
            }
        }
        CliConfig {
            deck_path: args.first().map(PathBuf::from),
            history_path: env("CHARADES_HISTORY")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH)),
            game,
        }
    }
}
