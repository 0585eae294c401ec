mod betting;
mod blinds;
mod dealing;
mod showdown;
mod state;

pub use showdown::{PotAward, PotWinnerAward};
pub use state::{ActedAction, ActedInfo, ActionPrompt, PlayerRef, SeatPublic, TableSnapshot};

use crate::game::deck::{Card, Deck};
use crate::game::pot::PotManager;
use crate::game::seat::Seat;
use crate::notify::{Event, Notifier};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundStage {
    PreFlop,
    Flop,
    Turn,
    River,
    /// Only one contender left; remaining streets are not dealt
    EarlyWin,
}

impl RoundStage {
    fn next(self) -> RoundStage {
        match self {
            RoundStage::PreFlop => RoundStage::Flop,
            RoundStage::Flop => RoundStage::Turn,
            RoundStage::Turn | RoundStage::River | RoundStage::EarlyWin => RoundStage::River,
        }
    }
}

/// Where the hand state machine is suspended after a step
#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    /// A betting lap is in progress and this seat is on turn
    AwaitingAction { seat: usize },
    /// All-in reveal pause before the next street is dealt
    RevealPause,
    /// The hand is settled; pots have been awarded
    HandComplete(Vec<PotAward>),
}

/// Per-hand table state plus the seats, which live across hands.
///
/// The table never arms timers itself: every method runs to the next
/// suspension point and reports it through `TableStatus`.
#[derive(Debug, Clone)]
pub struct Table {
    pub room_id: String,
    pub seats: Vec<Seat>,
    pub board: Vec<Card>,
    deck: Deck,
    pub pots: PotManager,
    /// Current street's table bet
    pub bet: i64,
    /// Minimum raise increment for the street
    pub raise: i64,
    pub button: usize,
    pub current_player: usize,
    pub round_stage: RoundStage,
    pub big_blind: i64,
    pub all_in_count: usize,
    pub num_players_in_game: usize,
    /// No further betting possible this hand (preflop blind all-ins)
    finish_betting: bool,
    /// An all-in happened this street, side pots must be split off
    need_new_pot: bool,
}

impl Table {
    pub fn new(room_id: String) -> Self {
        Self {
            room_id,
            seats: Vec::new(),
            board: Vec::new(),
            deck: Deck::default(),
            pots: PotManager::new(),
            bet: 0,
            raise: 0,
            button: 0,
            current_player: 0,
            round_stage: RoundStage::PreFlop,
            big_blind: 0,
            all_in_count: 0,
            num_players_in_game: 0,
            finish_betting: false,
            need_new_pot: false,
        }
    }

    pub fn add_seat(&mut self, player: Arc<Player>, stack: i64) {
        self.seats.push(Seat::new(player, stack));
    }

    /// Clear street state; a deep reset also clears the hand state and
    /// re-derives `in_game` from each seat's `seat_out` flag.
    pub fn reset_table(&mut self, deep: bool) {
        if deep {
            self.round_stage = RoundStage::PreFlop;
            self.num_players_in_game = 0;
            self.all_in_count = 0;
            self.finish_betting = false;
            self.pots.reset();
            self.board.clear();
            self.deck = Deck::default();
        }

        self.bet = 0;
        self.raise = 0;
        self.need_new_pot = false;

        for seat in &mut self.seats {
            if deep {
                seat.in_game = !seat.seat_out;
                seat.hand.clear();
                seat.total_bet = 0;
                seat.all_in = false;
                if seat.in_game {
                    self.num_players_in_game += 1;
                }
            }
            seat.is_acted = false;
            seat.bet = 0;
            seat.actions = None;
        }
    }

    /// Run one full hand up to its first suspension point: deep reset,
    /// blinds, hole cards, then the preflop street.
    pub fn start_hand(&mut self, notifier: &dyn Notifier, big_blind: i64) -> TableStatus {
        self.big_blind = big_blind;
        self.reset_table(true);

        if self.num_players_in_game < 2 {
            tracing::warn!(
                "Hand on table {} started with {} contenders, settling immediately",
                self.room_id,
                self.num_players_in_game
            );
            return self.finish_hand(notifier);
        }

        self.post_blinds();

        notifier.notify_room(
            &self.room_id,
            Event::NewRound(TableSnapshot::capture(self)),
            None,
        );

        self.deck = Deck::shuffled();
        self.deal_hole_cards(notifier);

        self.round_stage = RoundStage::PreFlop;
        self.enter_street(notifier)
    }

    /// Deal the street and either run its betting lap or, when no
    /// further action is possible, reveal the hands and pause.
    fn enter_street(&mut self, notifier: &dyn Notifier) -> TableStatus {
        self.deal_community(notifier);

        let live = self.num_players_in_game as i64 - self.all_in_count as i64;
        let skip_betting = (live < 2 && self.round_stage != RoundStage::PreFlop)
            || live == 0
            || self.finish_betting;

        if skip_betting {
            notifier.notify_room(
                &self.room_id,
                Event::NewStreet(TableSnapshot::capture(self)),
                None,
            );
            notifier.notify_room(
                &self.room_id,
                Event::AllIn {
                    hands: self.players_hands(),
                },
                None,
            );
            return TableStatus::RevealPause;
        }

        if self.round_stage != RoundStage::PreFlop {
            self.reset_table(false);
            self.set_current_player(self.button);
        }

        notifier.notify_room(
            &self.room_id,
            Event::NewStreet(TableSnapshot::capture(self)),
            None,
        );

        tracing::debug!(
            "Table {} street {:?}: betting lap starts at seat {}",
            self.room_id,
            self.round_stage,
            self.current_player
        );

        self.request_action(notifier);
        TableStatus::AwaitingAction {
            seat: self.current_player,
        }
    }

    /// Continue the street loop after a betting action was applied.
    pub fn advance_after_action(&mut self, notifier: &dyn Notifier) -> TableStatus {
        if self.lap_complete() {
            self.settle_current_street();

            if self.round_stage == RoundStage::EarlyWin
                || self.round_stage == RoundStage::River
            {
                return self.finish_hand(notifier);
            }
            self.round_stage = self.round_stage.next();
            return self.enter_street(notifier);
        }

        self.set_current_player(self.current_player);
        self.request_action(notifier);
        TableStatus::AwaitingAction {
            seat: self.current_player,
        }
    }

    /// Continue after the all-in reveal pause.
    pub fn resume_after_reveal(&mut self, notifier: &dyn Notifier) -> TableStatus {
        if self.round_stage == RoundStage::River {
            return self.finish_hand(notifier);
        }
        self.round_stage = self.round_stage.next();
        self.enter_street(notifier)
    }

    fn finish_hand(&mut self, notifier: &dyn Notifier) -> TableStatus {
        let awards = self.resolve_pots();

        let hands = if self.round_stage != RoundStage::EarlyWin {
            self.players_hands()
        } else {
            Default::default()
        };
        notifier.notify_room(
            &self.room_id,
            Event::RoundEnd {
                winners: awards.clone(),
                hands,
            },
            None,
        );

        TableStatus::HandComplete(awards)
    }

    /// Total chips sitting on the table: stacks, street bets not yet
    /// potted, and pot contents. Constant for the duration of a hand.
    pub fn chips_on_table(&self) -> i64 {
        let seats: i64 = self.seats.iter().map(|s| s.stack + s.bet).sum();
        seats + self.pots.total()
    }
}
