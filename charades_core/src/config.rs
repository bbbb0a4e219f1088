use serde::{Deserialize, Serialize};

pub const DEFAULT_TURN_SECONDS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub turn_seconds: u32,
    /// Fixes every shuffle of the session when set.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            turn_seconds: DEFAULT_TURN_SECONDS,
            seed: None,
        }
    }
}
