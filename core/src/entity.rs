//! Settlement participants and request mode.

use crate::types::{EntityId, Score};
use serde::{Deserialize, Serialize};

/// One player inside a team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id:    EntityId,
    pub score: Score,
}

/// A settlement participant: a single player, or a team whose score is
/// the sum of its members' scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub id:      EntityId,
    pub score:   Score,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl Entity {
    pub fn player(id: impl Into<EntityId>, score: Score) -> Self {
        Self { id: id.into(), score, members: Vec::new() }
    }

    /// Saturates on overflow; settlement re-adds the members with
    /// checked arithmetic and rejects the team.
    pub fn team(id: impl Into<EntityId>, members: Vec<Member>) -> Self {
        let score = members.iter().fold(0, |acc: Score, m| acc.saturating_add(m.score));
        Self { id: id.into(), score, members }
    }

    /// Sum of member scores, or `None` on overflow.
    pub fn members_total(&self) -> Option<Score> {
        self.members.iter().try_fold(0, |acc: Score, m| acc.checked_add(m.score))
    }

    pub fn is_team(&self) -> bool {
        !self.members.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    #[default]
    Individual,
    Team,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Mode {
    pub loser_pays: bool,
    pub grouping:   Grouping,
}

impl Mode {
    pub fn individual() -> Self {
        Self { loser_pays: false, grouping: Grouping::Individual }
    }

    pub fn team() -> Self {
        Self { loser_pays: false, grouping: Grouping::Team }
    }

    pub fn with_loser_pays(mut self, loser_pays: bool) -> Self {
        self.loser_pays = loser_pays;
        self
    }
}
