use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::team::Team;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Display, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn flipped(&self) -> Verdict {
        match self {
            Verdict::Correct => Verdict::Incorrect,
            Verdict::Incorrect => Verdict::Correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub word: String,
    pub verdict: Verdict,
    pub team: Team,
}

/// Words judged since the last commit, still open to reclassification.
#[derive(Debug, Clone, Default)]
pub struct Review {
    entries: Vec<ReviewEntry>,
}

impl Review {
    pub fn new() -> Self {
        Review::default()
    }

    pub fn record(&mut self, word: String, verdict: Verdict, team: Team) {
        self.entries.push(ReviewEntry {
            word,
            verdict,
            team,
        });
    }

    /// Flips the verdict of the first entry for `word` and returns the updated entry.
    pub fn toggle(&mut self, word: &str) -> Option<&ReviewEntry> {
        let index = self.position(word)?;
        self.toggle_at(index)
    }

    /// Flips the entry at `index`. Decks may repeat a word, so this is the only way to
    /// reach a later copy.
    pub fn toggle_at(&mut self, index: usize) -> Option<&ReviewEntry> {
        let entry = self.entries.get_mut(index)?;
        entry.verdict = entry.verdict.flipped();
        Some(entry)
    }

    pub fn position(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.word == word)
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.entries.iter().filter(|e| e.verdict == verdict).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn drain(&mut self) -> Vec<ReviewEntry> {
        std::mem::take(&mut self.entries)
    }
}
