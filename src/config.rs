//! Tournament configuration, from the environment or defaults.

use std::time::Duration;

use crate::game::constants::{
    DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_BLIND_LEVELS, DEFAULT_BUY_IN, DEFAULT_LEVEL_TIME_MS,
    DEFAULT_NEXT_HAND_DELAY_MS, DEFAULT_NUM_SEATS, DEFAULT_REVEAL_DELAY_MS,
    DEFAULT_STARTING_BLIND, DEFAULT_STARTING_STACK,
};
use crate::tournament::blinds::BlindStructure;
use crate::tournament::prizes::PrizeStructure;

#[derive(Debug, Clone)]
pub struct Config {
    pub buy_in: i64,
    pub num_seats: usize,
    pub starting_stack: i64,
    pub structure: BlindStructure,
    /// How long each blind level lasts
    pub level_time: Duration,
    pub action_timeout: Duration,
    /// Pause between streets on an all-in run-out
    pub reveal_delay: Duration,
    pub next_hand_delay: Duration,
    /// Defaults to a table chosen by entrant count when None
    pub prizes: Option<PrizeStructure>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buy_in: DEFAULT_BUY_IN,
            num_seats: DEFAULT_NUM_SEATS,
            starting_stack: DEFAULT_STARTING_STACK,
            structure: BlindStructure::default(),
            level_time: Duration::from_millis(DEFAULT_LEVEL_TIME_MS),
            action_timeout: Duration::from_millis(DEFAULT_ACTION_TIMEOUT_MS),
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
            next_hand_delay: Duration::from_millis(DEFAULT_NEXT_HAND_DELAY_MS),
            prizes: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment (`SNG_*` variables),
    /// reading a `.env` file if present. Unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let starting_blind = env_parse("SNG_STARTING_BLIND", DEFAULT_STARTING_BLIND);
        let blind_levels = env_parse("SNG_BLIND_LEVELS", DEFAULT_BLIND_LEVELS);

        Self {
            buy_in: env_parse("SNG_BUY_IN", DEFAULT_BUY_IN),
            num_seats: env_parse("SNG_NUM_SEATS", DEFAULT_NUM_SEATS),
            starting_stack: env_parse("SNG_STARTING_STACK", DEFAULT_STARTING_STACK),
            structure: BlindStructure::standard(starting_blind, blind_levels),
            level_time: Duration::from_millis(env_parse(
                "SNG_LEVEL_TIME_MS",
                DEFAULT_LEVEL_TIME_MS,
            )),
            action_timeout: Duration::from_millis(env_parse(
                "SNG_ACTION_TIMEOUT_MS",
                DEFAULT_ACTION_TIMEOUT_MS,
            )),
            reveal_delay: Duration::from_millis(env_parse(
                "SNG_REVEAL_DELAY_MS",
                DEFAULT_REVEAL_DELAY_MS,
            )),
            next_hand_delay: Duration::from_millis(env_parse(
                "SNG_NEXT_HAND_DELAY_MS",
                DEFAULT_NEXT_HAND_DELAY_MS,
            )),
            prizes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.buy_in, DEFAULT_BUY_IN);
        assert_eq!(config.num_seats, DEFAULT_NUM_SEATS);
        assert_eq!(config.structure.first(), DEFAULT_STARTING_BLIND);
        assert!(config.prizes.is_none());
    }
}
