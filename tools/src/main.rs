//! settle-runner: headless settlement runner.
//!
//! Usage:
//!   settle-runner --request game.json [--policy data/policy.json]
//!   settle-runner --simulate --seed 12345 --games 10000

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::env;
use tablepot_core::{
    compute_settlement_with,
    rng::{GameRng, RngStream},
    sample::sample_game,
    wire::{GameRecord, SettlementRequestDoc},
    PolicyConfig,
};

#[derive(serde::Serialize)]
struct SimulationSummary {
    seed:        u64,
    games:       u64,
    settled:     u64,
    rejected:    BTreeMap<String, u64>,
    unbalanced:  u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let games = parse_arg(&args, "--games", 1000u64);
    let simulate = args.iter().any(|a| a == "--simulate");
    let request = flag_value(&args, "--request");

    let policy = match flag_value(&args, "--policy") {
        Some(path) => PolicyConfig::load(path)?,
        None => PolicyConfig::default(),
    };

    if simulate {
        let summary = run_simulation(&policy, seed, games);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        anyhow::ensure!(summary.unbalanced == 0, "{} settlements leaked currency", summary.unbalanced);
        return Ok(());
    }

    let path = request.context("missing --request FILE (or pass --simulate)")?;
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let doc = SettlementRequestDoc::from_json(&content)?;
    let entities = doc.to_entities()?;
    let settlement = compute_settlement_with(&policy, &entities, doc.total_amount, doc.mode())?;

    let record = GameRecord::new(&settlement, chrono::Utc::now());
    log::info!(
        "settled game {} for {} players, pot {}",
        record.game_id,
        record.results.players.len(),
        settlement.total_amount
    );
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_simulation(policy: &PolicyConfig, seed: u64, games: u64) -> SimulationSummary {
    let mut rng = GameRng::new(seed, RngStream::SampleGames);
    let mut summary = SimulationSummary {
        seed,
        games,
        settled: 0,
        rejected: BTreeMap::new(),
        unbalanced: 0,
    };

    for _ in 0..games {
        let game = sample_game(&mut rng, policy.pot_bounds);
        match compute_settlement_with(policy, &game.entities, game.total_amount, game.mode) {
            Ok(settlement) => {
                summary.settled += 1;
                if !settlement.is_balanced() {
                    log::warn!(
                        "unbalanced settlement: allocated {} of {}",
                        settlement.allocated(),
                        settlement.total_amount
                    );
                    summary.unbalanced += 1;
                }
            }
            Err(e) => {
                *summary.rejected.entry(format!("{:?}", e.kind())).or_insert(0) += 1;
            }
        }
    }

    log::info!(
        "simulated {games} games (seed {seed}): {} settled, {} unbalanced",
        summary.settled,
        summary.unbalanced
    );
    summary
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
