//! Table configuration.
//!
//! `CastleConfig` fixes the deal shape and deck sizing for a game. The
//! defaults are the standard Castle table: 3 face-down, 3 face-up and a
//! 5-card hand, one deck for two players and two decks from three players.
//!
//! ```
//! use castle_engine::core::CastleConfig;
//!
//! let config = CastleConfig::default().with_hand_size(4);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.deck_count_for(2), 1);
//! assert_eq!(config.deck_count_for(5), 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("a game needs at least 2 players, got min_players = {0}")]
    TooFewPlayers(usize),
}

/// Deal shape and deck sizing for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleConfig {
    /// Hand depth players are topped back up to after a play.
    pub hand_size: usize,
    /// Cards dealt face-up per player.
    pub face_up_count: usize,
    /// Cards dealt face-down per player.
    pub face_down_count: usize,
    /// Fewest seated players `start_game` accepts.
    pub min_players: usize,
    /// Player count from which `decks_large` decks are used.
    pub multi_deck_threshold: usize,
    /// Decks shuffled together below the threshold.
    pub decks_small: usize,
    /// Decks shuffled together at or above the threshold.
    pub decks_large: usize,
}

impl Default for CastleConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            face_up_count: 3,
            face_down_count: 3,
            min_players: 2,
            multi_deck_threshold: 3,
            decks_small: 1,
            decks_large: 2,
        }
    }
}

impl CastleConfig {
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn with_face_up_count(mut self, count: usize) -> Self {
        self.face_up_count = count;
        self
    }

    pub fn with_face_down_count(mut self, count: usize) -> Self {
        self.face_down_count = count;
        self
    }

    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_players = count;
        self
    }

    pub fn with_deck_counts(mut self, threshold: usize, small: usize, large: usize) -> Self {
        self.multi_deck_threshold = threshold;
        self.decks_small = small;
        self.decks_large = large;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::Zero("hand_size"));
        }
        if self.face_up_count == 0 {
            return Err(ConfigError::Zero("face_up_count"));
        }
        if self.face_down_count == 0 {
            return Err(ConfigError::Zero("face_down_count"));
        }
        if self.decks_small == 0 {
            return Err(ConfigError::Zero("decks_small"));
        }
        if self.decks_large == 0 {
            return Err(ConfigError::Zero("decks_large"));
        }
        if self.min_players < 2 {
            return Err(ConfigError::TooFewPlayers(self.min_players));
        }
        Ok(())
    }

    /// Number of 52-card decks to shuffle together for `player_count` players.
    #[must_use]
    pub fn deck_count_for(&self, player_count: usize) -> usize {
        if player_count >= self.multi_deck_threshold {
            self.decks_large
        } else {
            self.decks_small
        }
    }

    /// Cards a single player receives on the deal.
    #[must_use]
    pub fn cards_per_player(&self) -> usize {
        self.face_down_count + self.face_up_count + self.hand_size
    }
}
