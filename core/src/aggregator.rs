//! Score aggregation: the first pipeline stage.
//!
//! Orders entities by score, highest first. Equal scores keep their
//! input order, so the first-seen entity holds the earlier rank.
//! Tie groups are reported alongside so later stages can pay ties
//! equally.

use crate::{
    entity::Entity,
    error::{SettleError, SettleResult},
    types::{EntityId, Score},
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntity {
    pub id:          EntityId,
    pub score:       Score,
    /// Position in the caller's original list.
    pub input_index: usize,
}

/// Rank positions that share one score. Positions are contiguous and
/// ascending, so `ranks[0]` is also the first-seen member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroup {
    pub score: Score,
    pub ranks: Vec<usize>,
}

impl RankGroup {
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn is_tie(&self) -> bool {
        self.ranks.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub ranked: Vec<RankedEntity>,
    /// Groups in rank order; the last group holds the lowest score.
    pub groups: Vec<RankGroup>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn lowest_group(&self) -> Option<&RankGroup> {
        self.groups.last()
    }

    /// True when every entity shares one score.
    pub fn is_draw(&self) -> bool {
        self.groups.len() == 1
    }
}

pub fn rank_entities(entities: &[Entity]) -> SettleResult<Ranking> {
    if entities.len() < 2 {
        return Err(SettleError::TooFewEntities { count: entities.len() });
    }

    let mut seen = BTreeSet::new();
    for (index, entity) in entities.iter().enumerate() {
        if entity.id.trim().is_empty() {
            return Err(SettleError::BlankEntityId { index });
        }
        if !seen.insert(entity.id.as_str()) {
            return Err(SettleError::DuplicateEntity { id: entity.id.clone() });
        }
    }

    let mut ranked: Vec<RankedEntity> = entities
        .iter()
        .enumerate()
        .map(|(input_index, e)| RankedEntity {
            id: e.id.clone(),
            score: e.score,
            input_index,
        })
        .collect();
    // sort_by is stable: ties stay in input order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let mut groups: Vec<RankGroup> = Vec::new();
    for (rank, entity) in ranked.iter().enumerate() {
        match groups.last_mut() {
            Some(group) if group.score == entity.score => group.ranks.push(rank),
            _ => groups.push(RankGroup { score: entity.score, ranks: vec![rank] }),
        }
    }

    log::debug!(
        "aggregate: ranked {} entities into {} groups",
        ranked.len(),
        groups.len()
    );

    Ok(Ranking { ranked, groups })
}
