use super::*;
use crate::game::constants::{FLOP_CARDS, HOLE_CARDS, RIVER_CARDS, TURN_CARDS};

impl Table {
    /// Deal hole cards one at a time around the table, then show each
    /// player their own hand privately.
    pub(crate) fn deal_hole_cards(&mut self, notifier: &dyn Notifier) {
        for _ in 0..HOLE_CARDS {
            for seat in &mut self.seats {
                if !seat.in_game {
                    continue;
                }
                match self.deck.deal() {
                    Some(card) => seat.hand.push(card),
                    None => tracing::error!("Deck exhausted while dealing hole cards"),
                }
            }
        }

        for seat in &self.seats {
            let hand = if seat.in_game {
                Some(seat.hand.clone())
            } else {
                None
            };
            notifier.notify_player(&seat.player, &self.room_id, Event::DealCards { hand });
        }
    }

    /// Burn one card and deal the street's community cards, if any.
    pub(crate) fn deal_community(&mut self, notifier: &dyn Notifier) {
        let n = match self.round_stage {
            RoundStage::Flop => FLOP_CARDS,
            RoundStage::Turn => TURN_CARDS,
            RoundStage::River => RIVER_CARDS,
            _ => return,
        };

        self.deck.deal();
        for _ in 0..n {
            match self.deck.deal() {
                Some(card) => self.board.push(card),
                None => tracing::error!("Deck exhausted while dealing the board"),
            }
        }

        notifier.notify_room(
            &self.room_id,
            Event::PublicCards {
                board: self.board.clone(),
            },
            None,
        );
    }
}
