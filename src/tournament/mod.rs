pub mod blinds;
pub mod prizes;
pub mod room;
pub mod runner;

use serde::{Deserialize, Serialize};

pub use blinds::BlindStructure;
pub use prizes::PrizeStructure;
pub use room::{Suspension, SuspensionKind, TournamentRoom};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentState {
    /// Registration open
    Wait,
    Run,
    Pause,
    Finished,
    Canceled,
}
