//! Shared primitive types used across the settlement pipeline.

/// A raw game score. Scores may go negative.
pub type Score = i64;

/// A stable identifier for a player or a team (its display name).
pub type EntityId = String;

/// Whole currency units (e.g. rupees).
pub type Amount = u64;

/// Whole percentage points, 0..=100.
pub type Percent = u32;

/// Every percentage table must add up to this.
pub const FULL_POT_PERCENT: Percent = 100;
