//! The blind ladder. Levels are 1-based; escalation is decided by the
//! room's level clock and applied only at hand boundaries.

use serde::{Deserialize, Serialize};

use crate::game::constants::{DEFAULT_BLIND_LEVELS, DEFAULT_STARTING_BLIND};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlindStructure {
    levels: Vec<i64>,
}

impl BlindStructure {
    /// An empty ladder degenerates to a single default level, so
    /// `first()` always has something to return.
    pub fn new(mut levels: Vec<i64>) -> Self {
        if levels.is_empty() {
            levels.push(DEFAULT_STARTING_BLIND);
        }
        Self { levels }
    }

    /// A doubling ladder starting from `starting` big blind.
    pub fn standard(starting: i64, levels: usize) -> Self {
        let mut ladder = Vec::with_capacity(levels.max(1));
        let mut blind = starting;
        for _ in 0..levels.max(1) {
            ladder.push(blind);
            blind = blind.saturating_mul(2);
        }
        Self { levels: ladder }
    }

    /// Big blind for a 1-based level; None past the end of the ladder,
    /// in which case the caller stays at the last reached blind.
    pub fn big_blind(&self, level: usize) -> Option<i64> {
        if level == 0 {
            return None;
        }
        self.levels.get(level - 1).copied()
    }

    pub fn first(&self) -> i64 {
        self.levels.first().copied().unwrap_or(DEFAULT_STARTING_BLIND)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

impl Default for BlindStructure {
    fn default() -> Self {
        Self::standard(DEFAULT_STARTING_BLIND, DEFAULT_BLIND_LEVELS)
    }
}
