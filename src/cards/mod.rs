//! Card system: card values, ranks, and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: Unique identifier for one physical card
//! - `Card`: Suit, rank and id; plain `Copy` value
//! - `Rank`: Play values and the special-rank classification (2, 7, 10)
//!
//! `build_deck` produces a freshly numbered, shuffled multi-deck.

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Rank, Suit, SEVEN_CEILING};
pub use deck::{build_deck, shuffle, DECK_SIZE};
