//! Caller-owned game sessions.
//!
//! A session holds the running scores, the score-change log and the
//! elapsed clock for one game on screen. It owns nothing global: the
//! host keeps the value and passes it to `settle` when the game ends.

use crate::{
    assembler::Settlement,
    clock::ElapsedClock,
    config::{PolicyConfig, PotBounds},
    entity::{Entity, Member, Mode},
    error::{SettleError, SettleResult},
    roster::validate_roster,
    settlement::compute_settlement_with,
    types::Score,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many log entries the activity sheet shows.
pub const RECENT_EVENTS: usize = 12;

/// The table amount as configured on the settings screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotSettings {
    total_amount: i64,
    bounds:       PotBounds,
}

impl Default for PotSettings {
    fn default() -> Self {
        Self { total_amount: 100, bounds: PotBounds::default() }
    }
}

impl PotSettings {
    pub fn new(total_amount: i64, bounds: PotBounds) -> SettleResult<Self> {
        let mut settings = Self { total_amount: bounds.min, bounds };
        settings.set_total_amount(total_amount)?;
        Ok(settings)
    }

    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    pub fn set_total_amount(&mut self, amount: i64) -> SettleResult<()> {
        if amount <= 0 {
            return Err(SettleError::NonPositivePot { amount });
        }
        if amount < self.bounds.min || amount > self.bounds.max {
            return Err(SettleError::PotOutOfRange {
                amount,
                min: self.bounds.min,
                max: self.bounds.max,
            });
        }
        self.total_amount = amount;
        Ok(())
    }
}

/// One +/- press on a score card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEvent {
    pub player:         String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team:           Option<String>,
    pub points_changed: Score,
    pub at:             DateTime<Utc>,
}

/// Newest first, at most `limit` entries.
fn recent(history: &[ScoreEvent], limit: usize) -> Vec<&ScoreEvent> {
    history.iter().rev().take(limit).collect()
}

// ── Individual game ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Players in seating order with their running scores.
    scores:         Vec<(String, Score)>,
    pub loser_pays: bool,
    history:        Vec<ScoreEvent>,
    pub clock:      ElapsedClock,
}

impl GameSession {
    pub fn new<S: AsRef<str>>(names: &[S]) -> SettleResult<Self> {
        let names = validate_roster(names)?;
        if names.len() < 2 {
            return Err(SettleError::RosterTooSmall { required: 2, count: names.len() });
        }
        Ok(Self {
            scores: names.into_iter().map(|n| (n, 0)).collect(),
            loser_pays: false,
            history: Vec::new(),
            clock: ElapsedClock::new(),
        })
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.scores.iter().map(|(name, _)| name.as_str())
    }

    pub fn score(&self, player: &str) -> Option<Score> {
        self.scores.iter().find(|(n, _)| n == player).map(|&(_, s)| s)
    }

    /// Apply a score change and log it. Returns the new score.
    pub fn add_points(&mut self, player: &str, delta: Score, at: DateTime<Utc>) -> SettleResult<Score> {
        let (_, score) = self
            .scores
            .iter_mut()
            .find(|(n, _)| n == player)
            .ok_or_else(|| SettleError::UnknownPlayer { name: player.to_string() })?;
        *score = score
            .checked_add(delta)
            .ok_or_else(|| SettleError::ScoreOverflow { id: player.to_string() })?;
        self.history.push(ScoreEvent {
            player: player.to_string(),
            team: None,
            points_changed: delta,
            at,
        });
        Ok(*score)
    }

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    pub fn recent_events(&self) -> Vec<&ScoreEvent> {
        recent(&self.history, RECENT_EVENTS)
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.scores
            .iter()
            .map(|(name, score)| Entity::player(name.clone(), *score))
            .collect()
    }

    pub fn mode(&self) -> Mode {
        Mode::individual().with_loser_pays(self.loser_pays)
    }

    pub fn settle(&self, pot: &PotSettings, config: &PolicyConfig) -> SettleResult<Settlement> {
        compute_settlement_with(config, &self.entities(), pot.total_amount(), self.mode())
    }

    /// Zero every score and clear the log and clock. Roster stays.
    pub fn reset(&mut self) {
        for (_, score) in &mut self.scores {
            *score = 0;
        }
        self.history.clear();
        self.clock.reset();
    }
}

// ── Team game ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamRoster {
    pub name:    String,
    pub players: Vec<(String, Score)>,
}

impl TeamRoster {
    /// Saturates on overflow.
    pub fn total(&self) -> Score {
        self.players.iter().fold(0, |acc: Score, (_, s)| acc.saturating_add(*s))
    }

    fn to_entity(&self) -> Entity {
        let members = self
            .players
            .iter()
            .map(|(id, score)| Member { id: id.clone(), score: *score })
            .collect();
        Entity::team(self.name.clone(), members)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSession {
    teams:          [TeamRoster; 2],
    pub loser_pays: bool,
    history:        Vec<ScoreEvent>,
    pub clock:      ElapsedClock,
}

impl TeamSession {
    pub fn new<S: AsRef<str>>(
        team_names: [&str; 2],
        first: &[S],
        second: &[S],
    ) -> SettleResult<Self> {
        for (index, name) in team_names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SettleError::BlankEntityId { index });
            }
        }
        if team_names[0].trim() == team_names[1].trim() {
            return Err(SettleError::DuplicateEntity { id: team_names[0].trim().to_string() });
        }
        // Names must be unique across both teams, not just within one.
        let all: Vec<&str> = first.iter().chain(second).map(|s| s.as_ref()).collect();
        let all = validate_roster(all.as_slice())?;
        let (a, b) = all.split_at(first.len());
        for (team, players) in team_names.iter().zip([a, b]) {
            if players.is_empty() {
                return Err(SettleError::EmptyTeam { team: team.trim().to_string() });
            }
        }

        let roster = |name: &str, players: &[String]| TeamRoster {
            name: name.trim().to_string(),
            players: players.iter().map(|p| (p.clone(), 0)).collect(),
        };
        Ok(Self {
            teams: [roster(team_names[0], a), roster(team_names[1], b)],
            loser_pays: false,
            history: Vec::new(),
            clock: ElapsedClock::new(),
        })
    }

    pub fn teams(&self) -> &[TeamRoster; 2] {
        &self.teams
    }

    pub fn add_points(
        &mut self,
        player: &str,
        delta: Score,
        at: DateTime<Utc>,
    ) -> SettleResult<Score> {
        for team in &mut self.teams {
            if let Some((_, score)) = team.players.iter_mut().find(|(n, _)| n == player) {
                *score = score
                    .checked_add(delta)
                    .ok_or_else(|| SettleError::ScoreOverflow { id: player.to_string() })?;
                let new_score = *score;
                self.history.push(ScoreEvent {
                    player: player.to_string(),
                    team: Some(team.name.clone()),
                    points_changed: delta,
                    at,
                });
                return Ok(new_score);
            }
        }
        Err(SettleError::UnknownPlayer { name: player.to_string() })
    }

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    /// The team sheet lists the whole log, newest first.
    pub fn recent_events(&self) -> Vec<&ScoreEvent> {
        recent(&self.history, self.history.len())
    }

    pub fn entities(&self) -> Vec<Entity> {
        self.teams.iter().map(TeamRoster::to_entity).collect()
    }

    pub fn mode(&self) -> Mode {
        Mode::team().with_loser_pays(self.loser_pays)
    }

    pub fn settle(&self, pot: &PotSettings, config: &PolicyConfig) -> SettleResult<Settlement> {
        compute_settlement_with(config, &self.entities(), pot.total_amount(), self.mode())
    }

    pub fn reset(&mut self) {
        for team in &mut self.teams {
            for (_, score) in &mut team.players {
                *score = 0;
            }
        }
        self.history.clear();
        self.clock.reset();
    }
}
