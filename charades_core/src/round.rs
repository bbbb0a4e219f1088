use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage};

pub const ROUND_COUNT: usize = 3;

#[derive(
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumMessage,
    Serialize,
    Deserialize,
)]
pub enum Round {
    #[strum(
        message = "Describe the word any way you like, but never say it, part of it, or a synonym."
    )]
    One,
    #[strum(message = "Give exactly one word as a clue.")]
    Two,
    #[strum(message = "Mime only. No words and no sounds.")]
    Three,
}

impl Round {
    pub fn first() -> Round {
        Round::One
    }

    pub fn next(&self) -> Option<Round> {
        match self {
            Round::One => Some(Round::Two),
            Round::Two => Some(Round::Three),
            Round::Three => None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn rule(&self) -> String {
        format!(
            "Round {}: {}",
            self.number(),
            self.get_message().unwrap_or("No rule")
        )
    }

    pub fn rules() -> String {
        Round::iter().map(|r| r.rule()).join("\n")
    }
}
