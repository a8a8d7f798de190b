use thiserror::Error;

use crate::types::EntityId;

#[derive(Error, Debug)]
pub enum SettleError {
    // ── Validation ─────────────────────────────────
    #[error("At least 2 entities are required, got {count}")]
    TooFewEntities { count: usize },

    #[error("Entity at position {index} has a blank id")]
    BlankEntityId { index: usize },

    #[error("Entity '{id}' appears more than once")]
    DuplicateEntity { id: EntityId },

    #[error("Score for '{id}' is not a finite integer: {raw}")]
    NonIntegerScore { id: EntityId, raw: String },

    #[error("Score for '{id}' is missing")]
    MissingScore { id: EntityId },

    #[error("Score for '{id}' overflows")]
    ScoreOverflow { id: EntityId },

    #[error("Pot amount must be positive, got {amount}")]
    NonPositivePot { amount: i64 },

    #[error("Pot amount {amount} outside allowed range [{min}, {max}]")]
    PotOutOfRange { amount: i64, min: i64, max: i64 },

    #[error("Team mode needs exactly 2 teams, got {count}")]
    TeamCount { count: usize },

    #[error("Team '{team}' has no members")]
    EmptyTeam { team: EntityId },

    #[error("Team '{team}' score {declared} does not match member total {members_total}")]
    TeamScoreMismatch { team: EntityId, declared: i64, members_total: i64 },

    #[error("Entity '{id}' has members but grouping is individual")]
    UnexpectedMembers { id: EntityId },

    #[error("Invalid player name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Player '{name}' is not part of this session")]
    UnknownPlayer { name: String },

    #[error("Roster needs at least {required} players, got {count}")]
    RosterTooSmall { required: usize, count: usize },

    // ── Configuration ──────────────────────────────
    #[error("Loser-pays has no rule for {count} entities")]
    UnsupportedLoserPays { count: usize },

    #[error("No tier table configured for {count} entities")]
    MissingTierTable { count: usize },

    #[error("Tier table for {count} entities is malformed: {reason}")]
    InvalidTierTable { count: usize, reason: String },

    // ── Serialization ──────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification callers use to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input. Surface a message; never submit a settlement.
    Validation,
    /// Unsupported count/mode combination or a broken policy. Never retried.
    Configuration,
    Serialization,
}

impl SettleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedLoserPays { .. }
            | Self::MissingTierTable { .. }
            | Self::InvalidTierTable { .. } => ErrorKind::Configuration,
            Self::Serialization(_) => ErrorKind::Serialization,
            _ => ErrorKind::Validation,
        }
    }
}

pub type SettleResult<T> = Result<T, SettleError>;
