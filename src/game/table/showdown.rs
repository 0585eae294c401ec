//! Per-pot winner resolution and chip distribution.

use super::*;
use crate::game::hand::{best_combination, HandRank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotWinnerAward {
    pub seat: usize,
    pub chips: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotAward {
    pub pot: usize,
    pub winners: Vec<PotWinnerAward>,
}

impl Table {
    /// Resolve every pot: filter contributors down to seats still in
    /// the hand, pick the strongest group (or the sole survivor on an
    /// early win), and split the chips with the remainder going to the
    /// first winner in sorted order.
    pub(crate) fn resolve_pots(&mut self) -> Vec<PotAward> {
        let mut result = Vec::new();

        for pot_index in 0..self.pots.pots.len() {
            let contributors = self.pots.pots[pot_index].contributors.clone();
            let mut eligible: Vec<usize> = contributors
                .iter()
                .copied()
                .filter(|&i| self.seats[i].in_game)
                .collect();
            if eligible.is_empty() {
                // A pot everyone abandoned falls back to its contributors
                eligible = contributors.iter().copied().collect();
            }

            let (winner_seats, comb) = if self.round_stage == RoundStage::EarlyWin {
                (eligible, None)
            } else {
                match self.best_group(&eligible) {
                    Some((group, comb)) => (group, Some(comb)),
                    None => (Vec::new(), None),
                }
            };

            let chips = self.pots.pots[pot_index].chips;
            let mut award = PotAward {
                pot: pot_index,
                winners: Vec::new(),
            };

            if winner_seats.len() > 1 {
                let count = winner_seats.len() as i64;
                let share = chips / count;
                for &seat in &winner_seats {
                    self.seats[seat].stack += share;
                    award.winners.push(PotWinnerAward { seat, chips: share });
                }

                let residue = chips % count;
                if residue > 0 {
                    // Deterministic: odd chips go to the first winner
                    self.seats[winner_seats[0]].stack += residue;
                    award.winners[0].chips += residue;
                }
            } else if let Some(&seat) = winner_seats.first() {
                self.seats[seat].stack += chips;
                award.winners.push(PotWinnerAward { seat, chips });
            }

            let pot = &mut self.pots.pots[pot_index];
            pot.winners = Some(winner_seats);
            pot.comb = comb;
            // The chips now live in the winners' stacks; the amounts
            // survive in the award and must not be counted twice.
            pot.chips = 0;

            tracing::info!(
                "Table {} pot {} ({} chips) -> {:?}",
                self.room_id,
                pot_index,
                chips,
                award.winners
            );
            result.push(award);
        }

        result
    }

    /// Rank the candidates' best combinations strongest first and merge
    /// strictly adjacent equal ranks into one winning group. Ties are
    /// never assumed between non-adjacent entries.
    fn best_group(&self, players: &[usize]) -> Option<(Vec<usize>, HandRank)> {
        let mut candidates: Vec<(Vec<usize>, HandRank)> = players
            .iter()
            .map(|&i| {
                (
                    vec![i],
                    best_combination(&self.seats[i].hand, &self.board),
                )
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));

        let mut merged: Vec<(Vec<usize>, HandRank)> = Vec::new();
        for (group, comb) in candidates {
            if let Some(last) = merged.last_mut() {
                if last.1 == comb {
                    last.0.extend(group);
                    continue;
                }
            }
            merged.push((group, comb));
        }

        merged.into_iter().next()
    }
}
