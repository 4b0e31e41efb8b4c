//! Simulated time.

use serde::{Deserialize, Serialize};

/// Day counter of the simulated clock.
///
/// Day 0 is the genesis day on which opening stock is posted; the first
/// simulated tick is day 1. There is no wall-clock time inside a run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimDay(pub u32);

impl SimDay {
    pub const GENESIS: SimDay = SimDay(0);

    pub fn new(day: u32) -> Self {
        Self(day)
    }

    pub fn next(self) -> SimDay {
        SimDay(self.0 + 1)
    }

    pub fn plus_days(self, days: u32) -> SimDay {
        SimDay(self.0 + days)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for SimDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
