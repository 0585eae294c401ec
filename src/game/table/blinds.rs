use super::*;
use crate::game::constants::HEADS_UP_PLAYER_COUNT;

impl Table {
    /// Post the forced bets and point `current_player` at the first
    /// preflop actor.
    ///
    /// Heads-up: the button posts the small blind and acts first
    /// preflop (but last on every later street). With 3+ contenders
    /// the seat after the button posts the small blind and action
    /// starts after the big blind.
    ///
    /// A blind that puts its seat all-in can close preflop betting on
    /// the spot, in which case the forced bets are potted immediately.
    pub(crate) fn post_blinds(&mut self) {
        let len = self.seats.len();
        let (sb, bb);

        if self.num_players_in_game == HEADS_UP_PLAYER_COUNT {
            sb = self.button;
            bb = (self.button + 1) % len;
            self.set_current_player(self.button + 1);
        } else {
            sb = (self.button + 1) % len;
            bb = (self.button + 2) % len;
            self.set_current_player(self.button + 2);
        }

        self.player_bet(sb, self.big_blind / 2);
        if self.seats[sb].all_in {
            self.seats[sb].is_acted = true;
        }

        if self.num_players_in_game == HEADS_UP_PLAYER_COUNT && self.seats[sb].all_in {
            // The short small blind is already committed; the big blind
            // only has to match it and the hand runs out on its own.
            let matched = self.seats[sb].bet;
            self.player_bet(bb, matched);
            self.settle_current_street();
            self.finish_betting = true;
        } else {
            self.player_bet(bb, self.big_blind);
        }

        if self.seats[bb].all_in {
            self.seats[bb].is_acted = true;
            if self.seats[sb].bet >= self.seats[bb].bet {
                self.settle_current_street();
                self.finish_betting = true;
            }
        }

        tracing::debug!(
            "Blinds posted on table {}: button={}, sb seat {} ({}), bb seat {} ({}), first to act {}",
            self.room_id,
            self.button,
            sb,
            self.seats[sb].bet,
            bb,
            self.seats[bb].bet,
            self.current_player
        );
    }
}
