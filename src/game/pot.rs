//! Pot accumulation and side-pot splitting.
//!
//! Chips flow seat -> pot only here. Pots are ordered and at most the
//! last one is open; a closed pot's chip total and contributor set
//! never change again.

use crate::game::hand::HandRank;
use crate::game::seat::Seat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pot {
    pub chips: i64,
    /// Seat indices that put chips into this pot (folded seats stay:
    /// their chips remain even though they forfeit eligibility)
    pub contributors: BTreeSet<usize>,
    pub open: bool,
    /// Assigned at resolution only
    pub winners: Option<Vec<usize>>,
    /// Winning combination; None when the pot was won without showdown
    pub comb: Option<HandRank>,
}

impl Pot {
    fn new() -> Self {
        Self {
            chips: 0,
            contributors: BTreeSet::new(),
            open: true,
            winners: None,
            comb: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotManager {
    pub pots: Vec<Pot>,
}

impl PotManager {
    pub fn new() -> Self {
        Self {
            pots: vec![Pot::new()],
        }
    }

    pub fn reset(&mut self) {
        self.pots = vec![Pot::new()];
    }

    pub fn total(&self) -> i64 {
        self.pots.iter().map(|p| p.chips).sum()
    }

    /// Fold the street's bets into the pots. When an all-in occurred
    /// this street (`need_new_pot`), pots are first closed out at each
    /// distinct all-in bet level, smallest first; whatever remains of
    /// the table bet goes into the open pot. Returns the residual table
    /// bet after the all-in closures.
    pub fn settle_street(
        &mut self,
        seats: &mut [Seat],
        table_bet: i64,
        need_new_pot: bool,
    ) -> i64 {
        let mut table_bet = table_bet;

        if need_new_pot {
            let mut all_in_seats: Vec<usize> = seats
                .iter()
                .enumerate()
                .filter(|(_, s)| s.all_in && s.bet > 0)
                .map(|(i, _)| i)
                .collect();
            all_in_seats.sort_by_key(|&i| seats[i].bet);

            for idx in all_in_seats {
                // Re-read: earlier closures already consumed part of it
                let chips_to_move = seats[idx].bet;
                self.move_chips(seats, chips_to_move, false);
                table_bet -= chips_to_move;
            }
        }

        self.move_chips(seats, table_bet, true);
        table_bet
    }

    /// Move up to `bet_level` chips from every betting seat into the
    /// open pot (creating one if the last pot is closed). A pot left
    /// empty is discarded; a pot left with a single contributor is
    /// refunded to that seat and removed - uncontested money returns.
    fn move_chips(&mut self, seats: &mut [Seat], bet_level: i64, open: bool) {
        if bet_level <= 0 {
            return;
        }

        if !self.pots.last().map(|p| p.open).unwrap_or(false) {
            self.pots.push(Pot::new());
        }

        let last = self.pots.len() - 1;
        let pot = &mut self.pots[last];
        pot.open = open;

        for (i, seat) in seats.iter_mut().enumerate() {
            if seat.bet > 0 {
                let chips = seat.bet.min(bet_level);
                pot.chips += chips;
                pot.contributors.insert(i);
                seat.bet -= chips;
            }
        }

        if pot.chips == 0 {
            self.pots.pop();
            return;
        }

        if pot.contributors.len() == 1 {
            let chips = pot.chips;
            let sole = pot.contributors.iter().next().copied();
            self.pots.pop();
            if let Some(seat_idx) = sole {
                seats[seat_idx].stack += chips;
                tracing::debug!(
                    "Returned {} uncontested chips to seat {}",
                    chips,
                    seat_idx
                );
            }
        }
    }
}
