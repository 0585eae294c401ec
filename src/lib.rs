pub mod config;
pub mod game;
pub mod notify;
pub mod player;
pub mod tournament;
