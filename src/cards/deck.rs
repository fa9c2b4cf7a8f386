//! Deck construction and shuffling.

use super::card::{Card, CardId, Rank, Suit};
use crate::core::rng::GameRng;

/// Cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// Build `num_decks` standard decks and shuffle them together.
///
/// Cards are numbered `0..num_decks * 52` in deck, suit, rank order before
/// the shuffle, so every copy of a rank and suit keeps its own id.
#[must_use]
pub fn build_deck(num_decks: usize, rng: &mut GameRng) -> Vec<Card> {
    let mut cards = Vec::with_capacity(num_decks * DECK_SIZE);
    let mut next_id = 0u32;

    for _ in 0..num_decks {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(CardId::new(next_id), suit, rank));
                next_id += 1;
            }
        }
    }

    shuffle(&mut cards, rng);
    cards
}

/// Fisher-Yates shuffle in place.
///
/// Walks from the last index down to 1, swapping each slot with a uniform
/// pick from `[0, i]`.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::{FxHashMap, FxHashSet};

    #[test]
    fn test_single_deck_composition() {
        let mut rng = GameRng::new(1);
        let deck = build_deck(1, &mut rng);

        assert_eq!(deck.len(), 52);

        let faces: FxHashSet<(Suit, Rank)> = deck.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(faces.len(), 52);
    }

    #[test]
    fn test_double_deck_has_two_of_each_face() {
        let mut rng = GameRng::new(2);
        let deck = build_deck(2, &mut rng);

        assert_eq!(deck.len(), 104);

        let mut counts: FxHashMap<(Suit, Rank), usize> = FxHashMap::default();
        for card in &deck {
            *counts.entry((card.suit, card.rank)).or_default() += 1;
        }
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = GameRng::new(3);
        let deck = build_deck(2, &mut rng);

        let ids: FxHashSet<CardId> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn test_same_seed_same_order() {
        let a = build_deck(1, &mut GameRng::new(99));
        let b = build_deck(1, &mut GameRng::new(99));
        let c = build_deck(1, &mut GameRng::new(100));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (0..20).collect();

        shuffle(&mut data, &mut rng);
        assert_ne!(data, (0..20).collect::<Vec<_>>());

        data.sort_unstable();
        assert_eq!(data, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = GameRng::new(5);

        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn test_shuffle_reaches_every_position() {
        // Each element of a 4-slice should land in every slot over many shuffles.
        let mut rng = GameRng::new(11);
        let mut seen = [[false; 4]; 4];

        for _ in 0..500 {
            let mut data = [0usize, 1, 2, 3];
            shuffle(&mut data, &mut rng);
            for (slot, &value) in data.iter().enumerate() {
                seen[value][slot] = true;
            }
        }

        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }
}
