use std::cell::RefCell;

use crate::outcome::GameSummary;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("could not write game record: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode game record: {0}")]
    Encode(String),

    #[error("recorder unavailable: {0}")]
    Unavailable(String),
}

/// Durable store for finished games. Called once per game and never read during play.
pub trait GameRecorder {
    fn record(&self, summary: &GameSummary) -> Result<(), RecordError>;
}

/// Keeps summaries in memory.
#[derive(Default)]
pub struct MemoryRecorder {
    records: RefCell<Vec<GameSummary>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        MemoryRecorder::default()
    }

    pub fn records(&self) -> Vec<GameSummary> {
        self.records.borrow().clone()
    }
}

impl GameRecorder for MemoryRecorder {
    fn record(&self, summary: &GameSummary) -> Result<(), RecordError> {
        self.records.borrow_mut().push(summary.clone());
        Ok(())
    }
}
