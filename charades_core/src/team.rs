use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    error::{StateError, ValidationError},
    utils::VecExtensions,
};

pub type PlayerId = String;

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub fn other(&self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// The two team rosters. Vector order is the turn rotation order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    blue: Vec<Player>,
    red: Vec<Player>,
    next_id: usize,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    pub fn players(&self, team: Team) -> &Vec<Player> {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    fn players_mut(&mut self, team: Team) -> &mut Vec<Player> {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn find(&self, id: &str) -> Option<(Team, &Player)> {
        self.blue
            .iter()
            .map(|p| (Team::Blue, p))
            .chain(self.red.iter().map(|p| (Team::Red, p)))
            .find(|(_, p)| p.id == id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.blue
            .iter()
            .chain(self.red.iter())
            .any(|p| p.name.to_lowercase() == wanted)
    }

    pub fn add(&mut self, team: Team, name: &str) -> Result<Player, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyPlayerName);
        }
        if self.contains_name(name) {
            return Err(ValidationError::DuplicatePlayerName(name.to_string()));
        }
        self.next_id += 1;
        let player = Player {
            id: format!("player-{}", self.next_id),
            name: name.to_string(),
        };
        self.players_mut(team).push(player.clone());
        Ok(player)
    }

    pub fn remove(&mut self, team: Team, id: &str) -> Result<Player, StateError> {
        self.players_mut(team)
            .remove_first_where(|p| p.id == id)
            .ok_or_else(|| StateError::UnknownPlayer(id.to_string(), team))
    }

    /// Removes the player from `from` and appends it to `to` in one step.
    pub fn move_player(&mut self, id: &str, from: Team, to: Team) -> Result<(), StateError> {
        if from == to {
            return Err(StateError::SameTeam(to));
        }
        let player = self.remove(from, id)?;
        self.players_mut(to).push(player);
        Ok(())
    }

    pub fn is_empty(&self, team: Team) -> bool {
        self.players(team).is_empty()
    }

    pub fn clear(&mut self) {
        self.blue.clear();
        self.red.clear();
    }

    /// Every player with the team they belong to, blue first.
    pub fn all(&self) -> Vec<(Team, &Player)> {
        self.blue
            .iter()
            .map(|p| (Team::Blue, p))
            .chain(self.red.iter().map(|p| (Team::Red, p)))
            .collect()
    }
}
