//! Prize distribution tables keyed by entrant count.

use serde::{Deserialize, Serialize};

/// Percentage of the prize pool per finishing position, first place
/// first. Percentages sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeStructure {
    percentages: Vec<i64>,
}

impl PrizeStructure {
    pub fn new(percentages: Vec<i64>) -> Self {
        if percentages.is_empty() {
            return Self::heads_up();
        }
        Self { percentages }
    }

    /// Winner takes all
    pub fn heads_up() -> Self {
        Self {
            percentages: vec![100],
        }
    }

    /// Two paid places, typical for short-handed tables
    pub fn six_max() -> Self {
        Self {
            percentages: vec![65, 35],
        }
    }

    /// Three paid places for a full ring
    pub fn nine_player() -> Self {
        Self {
            percentages: vec![50, 30, 20],
        }
    }

    pub fn for_player_count(count: usize) -> Self {
        match count {
            0..=2 => Self::heads_up(),
            3..=6 => Self::six_max(),
            _ => Self::nine_player(),
        }
    }

    pub fn paid_positions(&self) -> usize {
        self.percentages.len()
    }

    /// Prize for a 1-based finishing position. First place absorbs the
    /// integer-division remainder so the payouts always sum to the pool.
    pub fn prize_for_position(&self, prize_pool: i64, position: usize) -> i64 {
        if position == 0 || position > self.percentages.len() {
            return 0;
        }
        if position == 1 {
            let rest: i64 = self.percentages[1..]
                .iter()
                .map(|pct| prize_pool * pct / 100)
                .sum();
            return prize_pool - rest;
        }
        prize_pool * self.percentages[position - 1] / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payouts_sum_to_the_pool() {
        let prizes = PrizeStructure::nine_player();
        let pool = 905; // does not divide evenly by the percentages
        let total: i64 = (1..=prizes.paid_positions())
            .map(|pos| prizes.prize_for_position(pool, pos))
            .sum();
        assert_eq!(total, pool);
    }

    #[test]
    fn test_remainder_goes_to_first_place() {
        let prizes = PrizeStructure::six_max();
        assert_eq!(prizes.prize_for_position(101, 1), 66);
        assert_eq!(prizes.prize_for_position(101, 2), 35);
    }

    #[test]
    fn test_unpaid_positions_get_nothing() {
        let prizes = PrizeStructure::heads_up();
        assert_eq!(prizes.prize_for_position(200, 1), 200);
        assert_eq!(prizes.prize_for_position(200, 2), 0);
        assert_eq!(prizes.prize_for_position(200, 0), 0);
    }

    #[test]
    fn test_table_selection_by_entrant_count() {
        assert_eq!(PrizeStructure::for_player_count(2).paid_positions(), 1);
        assert_eq!(PrizeStructure::for_player_count(5).paid_positions(), 2);
        assert_eq!(PrizeStructure::for_player_count(9).paid_positions(), 3);
    }
}
