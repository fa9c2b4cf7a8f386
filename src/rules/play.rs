//! Play validation.
//!
//! Pure checks over a player and the discard pile: which layer a play comes
//! from, whether the nominated cards form a single-rank batch, and whether
//! that rank may go on the pile. None of this mutates state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::RuleError;
use crate::cards::{Card, CardId, Rank, SEVEN_CEILING};
use crate::core::{Layer, Player, PlayerId};

/// The cards a play resolves to, all from one layer and of one rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub layer: Layer,
    pub rank: Rank,
    pub cards: SmallVec<[Card; 4]>,
}

impl Selection {
    #[must_use]
    pub fn ids(&self) -> FxHashSet<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }
}

/// What an accepted turn action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// The cards went onto the pile, or burned it when `burned` is set.
    /// `next` is the player now to act; the same player after a 2.
    Played {
        rank: Rank,
        count: usize,
        burned: bool,
        next: PlayerId,
    },
    /// A face-down attempt failed: the revealed cards and the pile went to
    /// the player's hand.
    BlindPickup {
        revealed: SmallVec<[Card; 4]>,
        picked_up: usize,
        next: PlayerId,
    },
    /// The play emptied the player's last layer.
    Won(PlayerId),
    /// The player took the discard pile instead of playing.
    PickedUp { count: usize, next: PlayerId },
}

/// Resolve nominated ids against the player's active layer.
///
/// Ids that are not in the active layer are ignored, and repeats count once.
/// Fails when nothing matches or the matches mix ranks.
pub fn select(player: &Player, ids: &[CardId]) -> Result<Selection, RuleError> {
    let layer = player.active_layer().ok_or(RuleError::NoMatchingCards)?;
    let wanted: FxHashSet<CardId> = ids.iter().copied().collect();

    let cards: SmallVec<[Card; 4]> = player
        .layer(layer)
        .iter()
        .filter(|c| wanted.contains(&c.id))
        .copied()
        .collect();

    let rank = cards.first().map(|c| c.rank).ok_or(RuleError::NoMatchingCards)?;
    if cards.iter().any(|c| c.rank != rank) {
        return Err(RuleError::MixedRanks);
    }

    Ok(Selection { layer, rank, cards })
}

/// Whether `rank` may be played given the pile top and the seven-flag.
///
/// Wild ranks always go. Otherwise an empty pile accepts anything, a pending
/// seven caps the value at 7 (inclusive), and a plain pile needs equal or
/// higher value.
#[must_use]
pub fn is_playable(rank: Rank, top: Option<&Card>, after_seven: bool) -> bool {
    if rank.is_wild() {
        return true;
    }
    match top {
        None => true,
        Some(_) if after_seven => rank.value() <= SEVEN_CEILING,
        Some(top) => rank.value() >= top.play_value(),
    }
}
