//! Serializable views of the table for room notifications. Hole cards
//! never appear here except through `players_hands`, which is only
//! broadcast at reveal points.

use super::*;
use crate::game::pot::Pot;
use crate::game::seat::{ActionSet, ActionWord};
use std::collections::BTreeMap;

/// What the whole room may know about one seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatPublic {
    pub name: String,
    pub stack: i64,
    pub bet: i64,
    pub all_in: bool,
    pub in_game: bool,
    pub seat_out: bool,
}

/// Full public table state, sent at round and street boundaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub current_player: usize,
    pub round_stage: RoundStage,
    pub big_blind: i64,
    pub button: usize,
    pub board: Vec<Card>,
    pub pots: Vec<Pot>,
    pub bet: i64,
    pub seats: BTreeMap<usize, SeatPublic>,
}

impl TableSnapshot {
    pub fn capture(table: &Table) -> Self {
        let seats = table
            .seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                (
                    i,
                    SeatPublic {
                        name: seat.player.name.clone(),
                        stack: seat.stack,
                        bet: seat.bet,
                        all_in: seat.all_in,
                        in_game: seat.in_game,
                        seat_out: seat.seat_out,
                    },
                )
            })
            .collect();

        Self {
            current_player: table.current_player,
            round_stage: table.round_stage,
            big_blind: table.big_blind,
            button: table.button,
            board: table.board.clone(),
            pots: table.pots.pots.clone(),
            bet: table.bet,
            seats,
        }
    }
}

/// Sent privately to the seat on turn together with everything needed
/// to size a bet or raise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPrompt {
    pub seat: usize,
    pub stack: i64,
    pub bet: i64,
    pub pots: Vec<Pot>,
    pub table_bet: i64,
    pub table_raise: i64,
    pub actions: ActionSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActedAction {
    pub word: ActionWord,
    pub bet: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRef {
    pub seat: usize,
    pub id: String,
    pub name: String,
}

/// An applied action plus the actor's resulting seat state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActedInfo {
    pub action: ActedAction,
    pub stack: i64,
    pub bet: i64,
    pub in_game: bool,
    pub player: PlayerRef,
}

impl Table {
    /// Hole cards per seat, `None` for seats out of the hand. Broadcast
    /// on all-in run-outs and at showdown.
    pub fn players_hands(&self) -> BTreeMap<usize, Option<Vec<Card>>> {
        self.seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                let hand = if seat.in_game && !seat.hand.is_empty() {
                    Some(seat.hand.clone())
                } else {
                    None
                };
                (i, hand)
            })
            .collect()
    }
}
