//! The betting lap: legal-action derivation, validation, application,
//! turn order and the lap completion predicate.

use super::*;
use crate::game::error::{GameError, GameResult};
use crate::game::seat::{ActionMessage, ActionSet, ActionWord};

impl Table {
    /// Derive and offer the current actor's legal action set, then
    /// prompt the player and tell the room who is on turn.
    pub(crate) fn request_action(&mut self, notifier: &dyn Notifier) {
        let seat_num = self.current_player;
        let seat = &self.seats[seat_num];

        let mut actions = ActionSet {
            fold: true,
            ..Default::default()
        };
        if self.bet == seat.bet {
            // Nothing to match: checking is free, folding pointless
            actions.fold = false;
            actions.check = true;
            if self.bet == 0 {
                actions.bet = true;
            } else {
                actions.raise = true;
            }
        } else {
            actions.call = true;
            if seat.stack > self.bet - seat.bet {
                actions.raise = true;
            }
        }

        let prompt = ActionPrompt {
            seat: seat_num,
            stack: seat.stack,
            bet: seat.bet,
            pots: self.pots.pots.clone(),
            table_bet: self.bet,
            table_raise: self.raise,
            actions,
        };

        let player = seat.player.clone();
        self.seats[seat_num].actions = Some(actions);

        notifier.notify_player(&player, &self.room_id, Event::ExpectedAction(prompt));
        notifier.notify_room(
            &self.room_id,
            Event::WaitingPlayerMove { seat: seat_num },
            Some(&player.name),
        );
    }

    /// Check an action message against the offered set and the table's
    /// betting rules. Leaves all state untouched.
    pub fn validate_action(&self, msg: &ActionMessage) -> GameResult<()> {
        let seat = &self.seats[self.current_player];
        let offered = seat.actions.ok_or(GameError::NoActionPending)?;

        if !offered.allows(msg.word) {
            return Err(GameError::ActionNotOffered { word: msg.word });
        }

        match msg.word {
            ActionWord::Bet => {
                let amount = msg.bet.ok_or(GameError::MissingAmount)?;
                if amount < self.big_blind {
                    return Err(GameError::BetTooSmall {
                        min: self.big_blind,
                        attempted: amount,
                    });
                }
            }
            ActionWord::Raise => {
                let amount = msg.bet.ok_or(GameError::MissingAmount)?;
                if seat.bet + amount < self.bet + self.raise {
                    return Err(GameError::RaiseTooSmall {
                        min: self.bet + self.raise - seat.bet,
                        attempted: amount,
                    });
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Apply a validated action for the seat on turn.
    pub fn apply_action(&mut self, msg: &ActionMessage) {
        let idx = self.current_player;
        match msg.word {
            ActionWord::Fold => {
                self.seats[idx].in_game = false;
                self.num_players_in_game -= 1;
            }
            ActionWord::Check => {}
            ActionWord::Call => {
                let due = self.bet - self.seats[idx].bet;
                self.player_bet(idx, due);
            }
            ActionWord::Bet | ActionWord::Raise => {
                self.player_bet(idx, msg.bet.unwrap_or(0));
            }
        }
        self.seats[idx].is_acted = true;
    }

    /// The default move when the action timer fires: check if the seat
    /// already matches the table bet, fold otherwise.
    pub(crate) fn apply_timeout_default(&mut self) -> ActionWord {
        let idx = self.current_player;
        if self.seats[idx].bet < self.bet {
            self.seats[idx].in_game = false;
            self.num_players_in_game -= 1;
            ActionWord::Fold
        } else {
            self.seats[idx].is_acted = true;
            ActionWord::Check
        }
    }

    /// Commit chips from a seat, clamping to its stack (all-in) and
    /// updating the table bet and minimum raise increment.
    pub(crate) fn player_bet(&mut self, idx: usize, chips: i64) {
        if chips <= 0 {
            return;
        }

        let mut chips = chips;
        {
            let seat = &mut self.seats[idx];
            if chips >= seat.stack {
                chips = seat.stack;
                seat.all_in = true;
                self.all_in_count += 1;
                self.need_new_pot = true;
            }
            seat.stack -= chips;
            seat.total_bet += chips;
            seat.bet += chips;
        }

        let seat_bet = self.seats[idx].bet;
        if self.bet < seat_bet {
            self.raise = seat_bet - self.bet;
            // Table bet never drops below the big blind
            self.bet = seat_bet.max(self.big_blind);
        }
    }

    /// The lap ends when every contender has answered and either is
    /// all-in or matches the table bet. A lap with a single contender
    /// left short-circuits the whole hand to an early win.
    pub(crate) fn lap_complete(&mut self) -> bool {
        if self.num_players_in_game == 1 {
            self.round_stage = RoundStage::EarlyWin;
            return true;
        }

        !self.seats.iter().any(|seat| {
            seat.in_game && (!seat.is_acted || (!seat.all_in && seat.bet < self.bet))
        })
    }

    /// Advance clockwise from `from` to the next seat that can act.
    /// Leaves `current_player` untouched when no seat qualifies.
    pub(crate) fn set_current_player(&mut self, from: usize) {
        let len = self.seats.len();
        for i in 0..len {
            let seat_num = (from + 1 + i) % len;
            let seat = &self.seats[seat_num];
            if seat.in_game && !seat.all_in {
                self.current_player = seat_num;
                return;
            }
        }
    }

    /// Fold the street's bets into the pots and keep the residual
    /// table bet, mirroring what the settlement consumed.
    pub(crate) fn settle_current_street(&mut self) {
        self.bet = self
            .pots
            .settle_street(&mut self.seats, self.bet, self.need_new_pot);
    }

    /// Payload describing an applied action, for `player-acted` and
    /// `action-completed` notifications.
    pub(crate) fn acted_info(&self, word: ActionWord, bet: Option<i64>) -> ActedInfo {
        let idx = self.current_player;
        let seat = &self.seats[idx];
        ActedInfo {
            action: ActedAction { word, bet },
            stack: seat.stack,
            bet: seat.bet,
            in_game: seat.in_game,
            player: PlayerRef {
                seat: idx,
                id: seat.player.id.clone(),
                name: seat.player.name.clone(),
            },
        }
    }
}
