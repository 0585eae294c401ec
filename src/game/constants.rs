//! Game-related constants and default configuration values

/// Default maximum number of seats at the table
pub const DEFAULT_NUM_SEATS: usize = 9;

/// Minimum registered players required to start a tournament
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Number of players for heads-up special blind/button rules
pub const HEADS_UP_PLAYER_COUNT: usize = 2;

/// Default tournament economics
pub const DEFAULT_BUY_IN: i64 = 100;
pub const DEFAULT_STARTING_STACK: i64 = 2000;

/// Default blind ladder: first-level big blind and level count
pub const DEFAULT_STARTING_BLIND: i64 = 20;
pub const DEFAULT_BLIND_LEVELS: usize = 10;

/// Timing defaults (in milliseconds)
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 3_000; // all-in reveal pause per street
pub const DEFAULT_NEXT_HAND_DELAY_MS: u64 = 5_000;
pub const DEFAULT_LEVEL_TIME_MS: u64 = 300_000; // blind escalation period

/// Number of hole cards dealt per seat
pub const HOLE_CARDS: usize = 2;

/// Community cards per street
pub const FLOP_CARDS: usize = 3;
pub const TURN_CARDS: usize = 1;
pub const RIVER_CARDS: usize = 1;

/// Broadcast channel capacity for the notification fan-out
pub const BROADCAST_CHANNEL_CAPACITY: usize = 100;
