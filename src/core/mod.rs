//! Core engine types: players, state, moves, RNG, configuration.
//!
//! This module contains the data model the rules engine transitions.
//! Nothing here enforces game rules; see `rules` for that.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::Move;
pub use config::{CastleConfig, ConfigError};
pub use player::{Layer, Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{Direction, GameState, GameStatus};
