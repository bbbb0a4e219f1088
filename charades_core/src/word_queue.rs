use rand::{seq::SliceRandom, Rng};

/// The words of the active round in play order, consumed once from front to back.
#[derive(Debug, Clone, Default)]
pub struct WordQueue {
    words: Vec<String>,
    cursor: usize,
}

impl WordQueue {
    pub fn shuffled<R: Rng + ?Sized>(mut words: Vec<String>, rng: &mut R) -> Self {
        words.shuffle(rng);
        WordQueue { words, cursor: 0 }
    }

    /// Reorders the same words and rewinds the cursor.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&String> {
        self.words.get(self.cursor)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.words.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.words.len()
    }

    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
