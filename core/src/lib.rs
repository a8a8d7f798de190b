//! Table-pot settlement: turns final game scores into a split of a fixed
//! pot that always adds back up to the pot.
//!
//! Entry point: [`settlement::compute_settlement`].

pub mod aggregator;
pub mod assembler;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod reconciler;
pub mod rng;
pub mod roster;
pub mod sample;
pub mod session;
pub mod settlement;
pub mod tie_merger;
pub mod tier_policy;
pub mod types;
pub mod wire;

pub use assembler::{Allocation, Settlement};
pub use config::PolicyConfig;
pub use entity::{Entity, Grouping, Member, Mode};
pub use error::{ErrorKind, SettleError, SettleResult};
pub use settlement::{compute_settlement, compute_settlement_with};
