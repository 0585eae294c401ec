//! Game-related error types
//!
//! Every reachable condition here is a rejected operation: the engine
//! never panics and never tears down a hand over a bad input.

use crate::game::seat::ActionWord;
use std::fmt;

/// Errors that can occur during tournament and betting operations
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    // Registration errors
    TableFull,
    AlreadyRegistered,
    NotRegistered,
    RegistrationClosed,
    InsufficientBalance { required: i64 },

    // Action errors
    NotYourTurn,
    NoActionPending,
    ActionNotOffered { word: ActionWord },
    MissingAmount,
    BetTooSmall { min: i64, attempted: i64 },
    RaiseTooSmall { min: i64, attempted: i64 },

    // Lifecycle errors
    NotWaiting,
    NotRunning,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::TableFull => write!(f, "Table is full"),
            GameError::AlreadyRegistered => write!(f, "Already registered"),
            GameError::NotRegistered => write!(f, "Not registered in this tournament"),
            GameError::RegistrationClosed => {
                write!(f, "Registration changes are only allowed before the start")
            }
            GameError::InsufficientBalance { required } => {
                write!(f, "Insufficient balance for buy-in of {}", required)
            }

            GameError::NotYourTurn => write!(f, "Not your turn"),
            GameError::NoActionPending => write!(f, "No action is expected right now"),
            GameError::ActionNotOffered { word } => {
                write!(f, "Action {} is not currently offered", word)
            }
            GameError::MissingAmount => write!(f, "Bet amount is required for this action"),
            GameError::BetTooSmall { min, attempted } => {
                write!(f, "Bet of {} is below the minimum of {}", attempted, min)
            }
            GameError::RaiseTooSmall { min, attempted } => {
                write!(f, "Raise of {} is below the minimum of {}", attempted, min)
            }

            GameError::NotWaiting => write!(f, "Tournament has already started"),
            GameError::NotRunning => write!(f, "Tournament is not running"),
        }
    }
}

impl std::error::Error for GameError {}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
