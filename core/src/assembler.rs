//! Result assembly: the last pipeline stage.

use crate::{
    aggregator::Ranking,
    entity::Mode,
    types::{Amount, EntityId, Score},
};
use serde::{Deserialize, Serialize};

/// One payee's slice of the pot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub entity_id: EntityId,
    pub score:     Score,
    pub amount:    Amount,
    /// Owning team, team games only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team:      Option<EntityId>,
    /// Whether the owning team won. `None` for individual games and draws.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_won:  Option<bool>,
}

/// The pot-conserving allocation list for one finished game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub total_amount: Amount,
    pub mode:         Mode,
    pub allocations:  Vec<Allocation>,
}

impl Settlement {
    pub fn allocated(&self) -> Amount {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    pub fn is_balanced(&self) -> bool {
        self.allocated() == self.total_amount
    }

    pub fn amount_for(&self, entity_id: &str) -> Option<Amount> {
        self.allocations
            .iter()
            .find(|a| a.entity_id == entity_id)
            .map(|a| a.amount)
    }
}

/// A row waiting for its amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payee {
    pub id:       EntityId,
    pub score:    Score,
    pub team:     Option<EntityId>,
    pub team_won: Option<bool>,
}

impl Payee {
    pub fn individual(id: EntityId, score: Score) -> Self {
        Self { id, score, team: None, team_won: None }
    }
}

/// Payees for an individual game, in rank order.
pub fn payees_from_ranking(ranking: &Ranking) -> Vec<Payee> {
    ranking
        .ranked
        .iter()
        .map(|r| Payee::individual(r.id.clone(), r.score))
        .collect()
}

/// Zip payees with their reconciled amounts. Order is preserved.
pub fn assemble(payees: Vec<Payee>, amounts: &[Amount]) -> Vec<Allocation> {
    debug_assert_eq!(payees.len(), amounts.len());
    payees
        .into_iter()
        .zip(amounts.iter().copied())
        .map(|(p, amount)| Allocation {
            entity_id: p.id,
            score: p.score,
            amount,
            team: p.team,
            team_won: p.team_won,
        })
        .collect()
}
