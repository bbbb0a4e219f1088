use std::{fs::OpenOptions, io::Write, path::PathBuf};

use charades_core::{
    recorder::{GameRecorder, RecordError},
    GameSummary,
};

/// Appends each finished game as one JSON line.
pub struct FileRecorder {
    path: PathBuf,
}

impl FileRecorder {
    pub fn new(path: PathBuf) -> Self {
        FileRecorder { path }
    }
}

impl GameRecorder for FileRecorder {
    fn record(&self, summary: &GameSummary) -> Result<(), RecordError> {
        let line = serde_json::to_string(summary).map_err(|e| RecordError::Encode(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}
