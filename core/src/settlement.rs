//! The settlement entry point.
//!
//! PIPELINE (fixed order, data flows forward only):
//!   1. aggregator   : rank entities, group ties
//!   2. tier_policy  : rank -> pot percentage
//!   3. tie_merger   : equal score, equal share (standard individual only)
//!   4. reconciler   : percentages -> whole units summing to the pot
//!   5. assembler    : zip ids, scores and amounts
//!
//! RULES:
//!   - No state survives a call. Same inputs, same Settlement.
//!   - Any failed precondition aborts the whole call. A partial split
//!     is never returned.

use crate::{
    aggregator::{rank_entities, Ranking},
    assembler::{assemble, payees_from_ranking, Payee, Settlement},
    config::PolicyConfig,
    entity::{Entity, Grouping, Mode},
    error::{SettleError, SettleResult},
    reconciler::{reconcile, Residual},
    tie_merger::merge_ties,
    tier_policy::{split_evenly, TeamShares, TierPolicy},
    types::{Amount, Percent, FULL_POT_PERCENT},
};
use std::collections::BTreeSet;

/// Settle with the default payout policy.
pub fn compute_settlement(
    entities: &[Entity],
    total_amount: i64,
    mode: Mode,
) -> SettleResult<Settlement> {
    compute_settlement_with(&PolicyConfig::default(), entities, total_amount, mode)
}

/// Settle with an explicit payout policy.
pub fn compute_settlement_with(
    config: &PolicyConfig,
    entities: &[Entity],
    total_amount: i64,
    mode: Mode,
) -> SettleResult<Settlement> {
    let result = settle(config, entities, total_amount, mode);
    if let Err(e) = &result {
        log::warn!(
            "settle: rejected {} entities ({mode:?}, pot {total_amount}): {e}",
            entities.len()
        );
    }
    result
}

fn settle(
    config: &PolicyConfig,
    entities: &[Entity],
    total_amount: i64,
    mode: Mode,
) -> SettleResult<Settlement> {
    let pot = positive_pot(total_amount)?;
    let ranking = rank_entities(entities)?;
    let policy = TierPolicy::new(config);

    let (payees, percents) = match mode.grouping {
        Grouping::Individual => {
            check_individuals(entities)?;
            let percents = if mode.loser_pays {
                policy.loser_pays(&ranking)?
            } else {
                let tiers = policy.standard(ranking.len())?;
                merge_ties(&tiers, &ranking.groups)
            };
            (payees_from_ranking(&ranking), percents)
        }
        Grouping::Team => {
            check_teams(entities)?;
            let shares = policy.team_shares(&ranking, mode.loser_pays)?;
            team_payees(entities, &ranking, shares)
        }
    };

    debug_assert_eq!(percents.iter().sum::<Percent>(), FULL_POT_PERCENT);
    let residual = if mode.loser_pays { Residual::NonZeroShares } else { Residual::Everyone };
    let amounts = reconcile(&percents, pot, residual);
    let settlement = Settlement {
        total_amount: pot,
        mode,
        allocations: assemble(payees, &amounts),
    };

    log::debug!(
        "settle: {} payees, pot {pot}, loser_pays={}",
        settlement.allocations.len(),
        mode.loser_pays
    );
    debug_assert!(settlement.is_balanced());
    Ok(settlement)
}

fn positive_pot(total_amount: i64) -> SettleResult<Amount> {
    if total_amount <= 0 {
        return Err(SettleError::NonPositivePot { amount: total_amount });
    }
    Ok(total_amount as Amount)
}

fn check_individuals(entities: &[Entity]) -> SettleResult<()> {
    match entities.iter().find(|e| e.is_team()) {
        Some(e) => Err(SettleError::UnexpectedMembers { id: e.id.clone() }),
        None => Ok(()),
    }
}

fn check_teams(entities: &[Entity]) -> SettleResult<()> {
    if entities.len() != 2 {
        return Err(SettleError::TeamCount { count: entities.len() });
    }
    let mut seen = BTreeSet::new();
    let mut position = 0;
    for team in entities {
        if team.members.is_empty() {
            return Err(SettleError::EmptyTeam { team: team.id.clone() });
        }
        let members_total = team
            .members_total()
            .ok_or_else(|| SettleError::ScoreOverflow { id: team.id.clone() })?;
        if members_total != team.score {
            return Err(SettleError::TeamScoreMismatch {
                team: team.id.clone(),
                declared: team.score,
                members_total,
            });
        }
        for member in &team.members {
            if member.id.trim().is_empty() {
                return Err(SettleError::BlankEntityId { index: position });
            }
            if !seen.insert(member.id.as_str()) {
                return Err(SettleError::DuplicateEntity { id: member.id.clone() });
            }
            position += 1;
        }
    }
    Ok(())
}

/// Flatten two teams into per-player payees and percentages.
/// Winners come first; on a draw the teams keep input order.
fn team_payees(
    entities: &[Entity],
    ranking: &Ranking,
    shares: TeamShares,
) -> (Vec<Payee>, Vec<Percent>) {
    let mut payees = Vec::new();
    let mut percents = Vec::new();

    match shares {
        TeamShares::Draw => {
            let players: usize = entities.iter().map(|t| t.members.len()).sum();
            percents = split_evenly(FULL_POT_PERCENT, players);
            for team in entities {
                push_members(&mut payees, team, None);
            }
            log::debug!("settle: team draw, pot shared by {players} players");
        }
        TeamShares::Decided { winner, loser } => {
            for (position, share) in [(0, winner), (1, loser)] {
                let team = &entities[ranking.ranked[position].input_index];
                percents.extend(split_evenly(share, team.members.len()));
                push_members(&mut payees, team, Some(position == 0));
            }
        }
    }

    (payees, percents)
}

fn push_members(payees: &mut Vec<Payee>, team: &Entity, won: Option<bool>) {
    payees.extend(team.members.iter().map(|m| Payee {
        id: m.id.clone(),
        score: m.score,
        team: Some(team.id.clone()),
        team_won: won,
    }));
}
