//! Tier policy: maps rank positions to pot percentages.
//!
//! Standard mode: a fixed ladder for the counts the policy lists, a
//! generated descending-proportional table above that.
//! Loser-pays mode: the lowest-scoring group carries the whole pot.
//!
//! Every table produced here is in rank order (index 0 = top score)
//! and sums to exactly 100.

use crate::{
    aggregator::Ranking,
    config::PolicyConfig,
    error::{SettleError, SettleResult},
    types::{Percent, FULL_POT_PERCENT},
};

/// Loser-pays is only defined up to this many individual entities.
pub const LOSER_PAYS_MAX_ENTITIES: usize = 4;

/// Team-level outcome of a two-team game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamShares {
    /// Equal totals: the pot is shared across every player of both teams.
    Draw,
    Decided { winner: Percent, loser: Percent },
}

pub struct TierPolicy<'a> {
    config: &'a PolicyConfig,
}

impl<'a> TierPolicy<'a> {
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self { config }
    }

    /// Standard-mode percentages by rank for `count` entities.
    pub fn standard(&self, count: usize) -> SettleResult<Vec<Percent>> {
        if let Some(table) = self.config.ladder_by_rank(count)? {
            return Ok(table);
        }
        if count > self.config.largest_fixed_count() {
            return Ok(generated_table(count));
        }
        Err(SettleError::MissingTierTable { count })
    }

    /// Loser-pays percentages by rank. Ties inside the lowest group are
    /// settled here, so the result must not go through the tie merger.
    pub fn loser_pays(&self, ranking: &Ranking) -> SettleResult<Vec<Percent>> {
        let count = ranking.len();
        if !(2..=LOSER_PAYS_MAX_ENTITIES).contains(&count) {
            return Err(SettleError::UnsupportedLoserPays { count });
        }
        let lowest = ranking
            .lowest_group()
            .ok_or(SettleError::TooFewEntities { count })?;

        let mut table = vec![0; count];
        let shares = split_evenly(FULL_POT_PERCENT, lowest.len());
        for (&rank, share) in lowest.ranks.iter().zip(shares) {
            table[rank] = share;
        }
        Ok(table)
    }

    /// Team-level shares for a ranking of exactly two teams.
    pub fn team_shares(&self, ranking: &Ranking, loser_pays: bool) -> SettleResult<TeamShares> {
        if ranking.len() != 2 {
            return Err(SettleError::TeamCount { count: ranking.len() });
        }
        if ranking.is_draw() {
            return Ok(TeamShares::Draw);
        }
        if loser_pays {
            return Ok(TeamShares::Decided { winner: 0, loser: FULL_POT_PERCENT });
        }
        let [winner, loser] = self.config.team_ladder_by_rank()?;
        Ok(TeamShares::Decided { winner, loser })
    }
}

/// Descending-proportional table for counts without a fixed ladder.
///
/// Rank `r` gets weight `round(100 / n * (n - r))`. Those weights add up
/// to well over 100, so they are scaled down to 100 with floors and the
/// leftover points handed out one at a time from rank 0.
pub fn generated_table(count: usize) -> Vec<Percent> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u64;
    // round-half-up of 100 * (n - r) / n in integers
    let weights: Vec<u64> = (0..n)
        .map(|r| (200 * (n - r) + n) / (2 * n))
        .collect();
    let total: u64 = weights.iter().sum();

    let full = u64::from(FULL_POT_PERCENT);
    let mut table: Vec<Percent> = weights
        .iter()
        .map(|&w| (full * w / total) as Percent)
        .collect();

    let assigned: Percent = table.iter().sum();
    for slot in table.iter_mut().take((FULL_POT_PERCENT - assigned) as usize) {
        *slot += 1;
    }
    table
}

/// Split `total` points across `parts`: `floor(total / parts)` each,
/// with the remainder added to the first part.
pub fn split_evenly(total: Percent, parts: usize) -> Vec<Percent> {
    if parts == 0 {
        return Vec::new();
    }
    let each = total / parts as Percent;
    let mut shares = vec![each; parts];
    shares[0] += total - each * parts as Percent;
    shares
}
