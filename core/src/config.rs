//! Payout policy configuration.
//!
//! Ladders are written the way players read them off the table card:
//! last place first, first place last. `TierPolicy` flips them into
//! rank order (rank 0 = top score) before use.

use crate::{
    error::{SettleError, SettleResult},
    types::{Percent, FULL_POT_PERCENT},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive range the settings screen accepts for the table amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for PotBounds {
    fn default() -> Self {
        Self { min: 10, max: 1000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Standard-mode ladders keyed by entity count, last place first.
    /// Counts without a ladder above the largest key get a generated table.
    pub ladders: BTreeMap<usize, Vec<Percent>>,
    /// Two-entry ladder for team games: losing team, then winning team.
    /// The losing side carries the larger share of a decided game.
    #[serde(default = "default_team_ladder")]
    pub team_ladder: Vec<Percent>,
    #[serde(default)]
    pub pot_bounds: PotBounds,
}

fn default_team_ladder() -> Vec<Percent> {
    vec![70, 30]
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let mut ladders = BTreeMap::new();
        ladders.insert(2, vec![50, 50]);
        ladders.insert(3, vec![25, 32, 43]);
        ladders.insert(4, vec![10, 20, 30, 40]);
        Self {
            ladders,
            team_ladder: default_team_ladder(),
            pot_bounds: PotBounds::default(),
        }
    }
}

impl PolicyConfig {
    /// Load from a JSON policy file and validate it.
    /// In tests, use PolicyConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: PolicyConfig = serde_json::from_str(&content)?;
        config.validate()?;
        anyhow::ensure!(
            config.pot_bounds.min > 0 && config.pot_bounds.min <= config.pot_bounds.max,
            "Invalid pot bounds in {path}: [{}, {}]",
            config.pot_bounds.min,
            config.pot_bounds.max
        );
        log::debug!("policy: loaded {} ladders from {path}", config.ladders.len());
        Ok(config)
    }

    /// Every ladder must match its entity count and sum to 100.
    pub fn validate(&self) -> SettleResult<()> {
        for (&count, ladder) in &self.ladders {
            check_ladder(count, ladder)?;
        }
        check_ladder(2, &self.team_ladder)
    }

    /// Largest entity count with an explicit ladder. Above this the
    /// table is generated.
    pub fn largest_fixed_count(&self) -> usize {
        self.ladders.keys().next_back().copied().unwrap_or(0)
    }

    /// The configured ladder for `count`, flipped into rank order.
    pub fn ladder_by_rank(&self, count: usize) -> SettleResult<Option<Vec<Percent>>> {
        match self.ladders.get(&count) {
            Some(ladder) => {
                check_ladder(count, ladder)?;
                Ok(Some(ladder.iter().rev().copied().collect()))
            }
            None => Ok(None),
        }
    }

    /// Team ladder in rank order: `[winner, loser]`.
    pub fn team_ladder_by_rank(&self) -> SettleResult<[Percent; 2]> {
        check_ladder(2, &self.team_ladder)?;
        Ok([self.team_ladder[1], self.team_ladder[0]])
    }
}

fn check_ladder(count: usize, ladder: &[Percent]) -> SettleResult<()> {
    if count < 2 {
        return Err(SettleError::InvalidTierTable {
            count,
            reason: "ladders start at 2 entities".into(),
        });
    }
    if ladder.len() != count {
        return Err(SettleError::InvalidTierTable {
            count,
            reason: format!("expected {count} entries, found {}", ladder.len()),
        });
    }
    let total: u64 = ladder.iter().map(|&p| u64::from(p)).sum();
    if total != u64::from(FULL_POT_PERCENT) {
        return Err(SettleError::InvalidTierTable {
            count,
            reason: format!("entries sum to {total}, not {FULL_POT_PERCENT}"),
        });
    }
    Ok(())
}
