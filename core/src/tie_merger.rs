//! Tie merging: equal score, equal share.
//!
//! Tied entities occupy adjacent ranks with different tier percentages.
//! Each tie group pools its percentages and splits them evenly; the
//! indivisible remainder goes to the group's first (earliest-ranked)
//! member.

use crate::{aggregator::RankGroup, types::Percent};

/// Merge tier percentages (rank order) across tie groups.
pub fn merge_ties(percents: &[Percent], groups: &[RankGroup]) -> Vec<Percent> {
    let mut merged = percents.to_vec();

    for group in groups.iter().filter(|g| g.is_tie()) {
        let size = group.len() as Percent;
        let pooled: Percent = group.ranks.iter().map(|&r| percents[r]).sum();
        let avg = pooled / size;
        for &rank in &group.ranks {
            merged[rank] = avg;
        }
        merged[group.ranks[0]] += pooled - avg * size;

        log::debug!(
            "merge: score {} shared by {} ranks, pooled {pooled}% -> {avg}% each",
            group.score,
            group.len()
        );
    }

    merged
}
