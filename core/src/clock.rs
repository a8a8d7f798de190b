//! Elapsed game time: owns the seconds counter and the running flag.
//!
//! Independent of the settlement pipeline: a host scheduler calls
//! `tick()` once per second while the game is on screen.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElapsedClock {
    pub seconds: u64,
    pub running: bool,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one second. Returns the new elapsed total.
    /// Panics if called while stopped. Callers must check first.
    pub fn tick(&mut self) -> u64 {
        assert!(self.running, "tick() called on stopped clock");
        self.seconds += 1;
        self.seconds
    }

    /// Starting a running clock is a no-op.
    pub fn start(&mut self) { self.running = true;  }
    pub fn stop(&mut self)  { self.running = false; }

    pub fn reset(&mut self) {
        self.seconds = 0;
        self.running = false;
    }

    /// `mm:ss`, minutes uncapped.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}
