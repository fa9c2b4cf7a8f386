//! # castle-engine
//!
//! A deterministic rules engine for Castle, the three-layer shedding card
//! game (also known as Shithead or Palace).
//!
//! ## Design Principles
//!
//! 1. **Authority-Agnostic**: The engine never talks to a network. Hosts call
//!    operations, broadcast the resulting `GameState`, and every participant
//!    rehydrates from the received snapshot.
//!
//! 2. **All-or-Nothing**: Each operation either commits fully or is rejected
//!    with the state untouched. A failed blind play is not a rejection: it is
//!    the pickup penalty, applied in full.
//!
//! 3. **Deterministic**: Shuffles and the starting seat come from a seedable
//!    `GameRng`, so a seed and a move list replay a game exactly.
//!
//! ## Game Flow
//!
//! `Waiting` (seat players) → `Setup` (swap hand and face-up cards, mark
//! ready) → `Playing` (play or pick up) → `Finished` (someone cleared all
//! three layers).
//!
//! ## Modules
//!
//! - `core`: Players, state, moves, RNG, configuration
//! - `cards`: Card values, special ranks, deck building and shuffling
//! - `rules`: Play validation and the `CastleEngine` state machine
//! - `snapshot`: Binary codec for broadcasting state

pub mod cards;
pub mod core;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    CastleConfig, ConfigError, Direction, GameRng, GameRngState, GameState, GameStatus, Layer,
    Move, Player, PlayerId,
};

pub use crate::cards::{build_deck, Card, CardId, Rank, Suit};

pub use crate::rules::{CastleEngine, GameResult, PlayOutcome, RuleError};

pub use crate::snapshot::SnapshotError;
