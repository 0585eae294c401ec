pub mod constants;
pub mod deck;
pub mod error;
pub mod hand;
pub mod pot;
pub mod seat;
pub mod table;

pub use deck::{Card, Deck};
pub use error::{GameError, GameResult};
pub use table::{RoundStage, Table, TableStatus};
