//! Seeded sample games for batch checks and the runner's simulate mode.

use crate::{
    config::PotBounds,
    entity::{Entity, Member, Mode},
    rng::GameRng,
    tier_policy::LOSER_PAYS_MAX_ENTITIES,
    types::Score,
};

pub const MAX_SAMPLE_PLAYERS: usize = 10;
const SCORE_RANGE: (Score, Score) = (-5, 12);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGame {
    pub entities:     Vec<Entity>,
    pub total_amount: i64,
    pub mode:         Mode,
}

/// Draw one game. Scores come from a narrow range so ties are common.
/// Loser-pays is only drawn where a rule exists.
pub fn sample_game(rng: &mut GameRng, bounds: PotBounds) -> SampleGame {
    let total_amount = bounds.min + rng.next_u64_below((bounds.max - bounds.min) as u64 + 1) as i64;

    if rng.chance(0.25) {
        let team = |rng: &mut GameRng, label: &str| {
            let size = 1 + rng.next_index(3);
            let members = (0..size)
                .map(|i| Member {
                    id: format!("{label}-P{i}"),
                    score: rng.next_score(SCORE_RANGE.0, SCORE_RANGE.1),
                })
                .collect();
            Entity::team(label, members)
        };
        let entities = vec![team(rng, "Team 1"), team(rng, "Team 2")];
        let mode = Mode::team().with_loser_pays(rng.chance(0.5));
        return SampleGame { entities, total_amount, mode };
    }

    let players = 2 + rng.next_index(MAX_SAMPLE_PLAYERS - 1);
    let entities = (0..players)
        .map(|i| Entity::player(format!("P{i}"), rng.next_score(SCORE_RANGE.0, SCORE_RANGE.1)))
        .collect();
    let loser_pays = players <= LOSER_PAYS_MAX_ENTITIES && rng.chance(0.5);
    SampleGame {
        entities,
        total_amount,
        mode: Mode::individual().with_loser_pays(loser_pays),
    }
}
