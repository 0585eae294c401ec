use crate::game::deck::Card;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One position at the table. Seat order is significant: it defines
/// turn order and the button rotation for the whole tournament.
#[derive(Debug, Clone)]
pub struct Seat {
    pub player: Arc<Player>,
    pub stack: i64,
    /// Chips committed this street
    pub bet: i64,
    /// Chips committed this hand
    pub total_bet: i64,
    /// Hole cards, populated only while `in_game`
    pub hand: Vec<Card>,
    pub all_in: bool,
    /// Still contesting the current hand
    pub in_game: bool,
    /// Sitting out future hands
    pub seat_out: bool,
    /// Has responded this betting lap
    pub is_acted: bool,
    /// The action set currently offered to this seat, if any
    pub actions: Option<ActionSet>,
}

impl Seat {
    pub fn new(player: Arc<Player>, stack: i64) -> Self {
        Self {
            player,
            stack,
            bet: 0,
            total_bet: 0,
            hand: Vec::new(),
            all_in: false,
            in_game: true,
            seat_out: false,
            is_acted: false,
            actions: None,
        }
    }
}

/// The set of legal actions offered to the seat on turn
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionSet {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub bet: bool,
    pub raise: bool,
}

impl ActionSet {
    pub fn allows(&self, word: ActionWord) -> bool {
        match word {
            ActionWord::Fold => self.fold,
            ActionWord::Check => self.check,
            ActionWord::Call => self.call,
            ActionWord::Bet => self.bet,
            ActionWord::Raise => self.raise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionWord {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for ActionWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ActionWord::Fold => "fold",
            ActionWord::Check => "check",
            ActionWord::Call => "call",
            ActionWord::Bet => "bet",
            ActionWord::Raise => "raise",
        };
        write!(f, "{}", word)
    }
}

/// A player's answer to an expected-action prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionMessage {
    pub word: ActionWord,
    pub bet: Option<i64>,
}

impl ActionMessage {
    pub fn simple(word: ActionWord) -> Self {
        Self { word, bet: None }
    }

    pub fn with_bet(word: ActionWord, bet: i64) -> Self {
        Self {
            word,
            bet: Some(bet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_set_membership() {
        let set = ActionSet {
            check: true,
            raise: true,
            ..Default::default()
        };
        assert!(set.allows(ActionWord::Check));
        assert!(set.allows(ActionWord::Raise));
        assert!(!set.allows(ActionWord::Fold));
        assert!(!set.allows(ActionWord::Call));
    }

    #[test]
    fn test_action_word_serde_round_trip() {
        let msg: ActionMessage =
            serde_json::from_str(r#"{"word":"raise","bet":40}"#).unwrap();
        assert_eq!(msg.word, ActionWord::Raise);
        assert_eq!(msg.bet, Some(40));
    }
}
