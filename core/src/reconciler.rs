//! Rounding reconciliation: percentages to whole currency units.
//!
//! Each share is floored, then the shortfall is handed out one unit at
//! a time starting from index 0.
//!
//! Postcondition: the returned amounts sum to `total`.

use crate::types::{Amount, Percent, FULL_POT_PERCENT};

/// Which entities may pick up residual units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residual {
    /// Every entity, in order from index 0.
    Everyone,
    /// Only entities holding a non-zero share, so a 0% entity stays at
    /// zero. Falls back to everyone when every share is 0%. Used by
    /// loser-pays, where winners must never be charged.
    NonZeroShares,
}

pub fn reconcile(percents: &[Percent], total: Amount, residual: Residual) -> Vec<Amount> {
    let mut amounts: Vec<Amount> = percents
        .iter()
        .map(|&p| (u128::from(p) * u128::from(total) / u128::from(FULL_POT_PERCENT)) as Amount)
        .collect();
    if amounts.is_empty() {
        return amounts;
    }

    let floored: Amount = amounts.iter().sum();
    let mut remainder = total.saturating_sub(floored);

    let mut eligible: Vec<usize> = match residual {
        Residual::Everyone => (0..percents.len()).collect(),
        Residual::NonZeroShares => (0..percents.len()).filter(|&i| percents[i] > 0).collect(),
    };
    if eligible.is_empty() {
        eligible = (0..percents.len()).collect();
    }

    if remainder > 0 {
        log::debug!(
            "reconcile: {remainder} residual units across {} eligible entities",
            eligible.len()
        );
    }
    for &index in eligible.iter().cycle() {
        if remainder == 0 {
            break;
        }
        amounts[index] += 1;
        remainder -= 1;
    }

    debug_assert_eq!(amounts.iter().sum::<Amount>(), total);
    amounts
}
