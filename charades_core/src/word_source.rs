/// Supplies the guessing pool for a game. The engine only ever reads it.
pub trait WordSource {
    fn deck_id(&self) -> &str;

    fn words(&self) -> Vec<String>;
}

static DEFAULT_WORDS: &[&str] = &[
    "lighthouse",
    "volcano",
    "penguin",
    "astronaut",
    "umbrella",
    "pirate",
    "waterfall",
    "skateboard",
    "dragon",
    "orchestra",
    "cactus",
    "snowman",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    id: String,
    words: Vec<String>,
}

impl Deck {
    pub fn new(id: &str, words: Vec<String>) -> Self {
        Deck {
            id: id.to_string(),
            words,
        }
    }

    pub fn default_deck() -> Self {
        Deck::new(
            "default",
            DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }

    /// One word per line; blank lines and lines starting with `#` are skipped.
    pub fn from_lines(id: &str, text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        Deck::new(id, words)
    }
}

impl WordSource for Deck {
    fn deck_id(&self) -> &str {
        &self.id
    }

    fn words(&self) -> Vec<String> {
        self.words.clone()
    }
}
