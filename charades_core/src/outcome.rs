use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{
    round::Round,
    team::{Roster, Team},
    utils::percent,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub blue: u32,
    pub red: u32,
}

impl Scores {
    pub fn get(&self, team: Team) -> u32 {
        match team {
            Team::Blue => self.blue,
            Team::Red => self.red,
        }
    }

    fn get_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn add(&mut self, team: Team) {
        *self.get_mut(team) += 1;
    }

    pub fn subtract(&mut self, team: Team) {
        let score = self.get_mut(team);
        *score = score.saturating_sub(1);
    }

    /// The team with the strictly higher score, `None` on a tie.
    pub fn winner(&self) -> Option<Team> {
        match self.blue.cmp(&self.red) {
            Ordering::Greater => Some(Team::Blue),
            Ordering::Less => Some(Team::Red),
            Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: Round,
    pub correct: Vec<String>,
    pub incorrect: Vec<String>,
    pub scores: Scores,
}

impl RoundOutcome {
    pub fn judged(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }

    pub fn accuracy_percent(&self) -> u32 {
        percent(self.correct.len(), self.judged())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: Team,
}

/// Final record of a game, handed to the recorder once the game ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub timestamp: u64,
    pub deck_id: Option<String>,
    pub winner: Option<Team>,
    pub score_blue: u32,
    pub score_red: u32,
    pub total_words: usize,
    pub total_correct: usize,
    pub accuracy_percent: u32,
    pub players: Vec<PlayerRecord>,
    pub rounds: Vec<RoundOutcome>,
}

impl GameSummary {
    pub fn new(
        timestamp: u64,
        deck_id: Option<String>,
        scores: Scores,
        rounds: Vec<RoundOutcome>,
        roster: &Roster,
    ) -> Self {
        let total_words = rounds.iter().map(|r| r.judged()).sum();
        let total_correct = rounds.iter().map(|r| r.correct.len()).sum();
        GameSummary {
            timestamp,
            deck_id,
            winner: scores.winner(),
            score_blue: scores.blue,
            score_red: scores.red,
            total_words,
            total_correct,
            accuracy_percent: percent(total_correct, total_words),
            players: roster
                .all()
                .into_iter()
                .map(|(team, p)| PlayerRecord {
                    name: p.name.clone(),
                    team,
                })
                .collect(),
            rounds,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}
