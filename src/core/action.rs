//! Move representation for the playing phase.
//!
//! A turn is either a play (one or more cards of the same rank) or picking
//! up the discard pile. Hosts can build moves from UI gestures, and
//! `legal_moves` enumerates them for bots and playouts.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;

/// A move during the playing phase.
///
/// ## Example
///
/// ```
/// use castle_engine::cards::CardId;
/// use castle_engine::core::Move;
///
/// let pair = Move::play(&[CardId::new(4), CardId::new(17)]);
/// assert_eq!(pair.card_count(), 2);
/// assert_eq!(Move::PickUp.card_count(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Play the nominated cards from the active layer.
    /// SmallVec covers the usual one to four copies without allocating.
    Play(SmallVec<[CardId; 4]>),
    /// Take the whole discard pile into hand.
    PickUp,
}

impl Move {
    #[must_use]
    pub fn play(cards: &[CardId]) -> Self {
        Move::Play(SmallVec::from_slice(cards))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            Move::Play(cards) => cards.len(),
            Move::PickUp => 0,
        }
    }

    #[must_use]
    pub fn is_pickup(&self) -> bool {
        matches!(self, Move::PickUp)
    }
}
