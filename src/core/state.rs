//! Game state: the full aggregate the engine transitions.
//!
//! `GameState` is the snapshot hosts broadcast. It holds the seated players
//! (seat order is turn order), both piles, whose turn it is, the phase, and
//! the transient seven-flag.
//!
//! Uses `im` persistent vectors so a clone is O(1); the engine stages each
//! transition on a clone and only commits it when the operation succeeds.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::cards::Card;

/// Game phase. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Setup,
    Playing,
    Finished,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Setup => "setup",
            GameStatus::Playing => "playing",
            GameStatus::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Direction of play around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Seat step: +1 or -1.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Complete table state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seated players in turn order.
    pub players: Vector<Player>,

    /// Undealt cards (top = back).
    pub draw_pile: Vector<Card>,

    /// Played cards (top = back).
    pub discard_pile: Vector<Card>,

    /// Whose turn it is. `None` until a game starts.
    pub current_turn: Option<PlayerId>,

    pub status: GameStatus,

    pub direction: Direction,

    /// The last play was a seven: the next play must be worth 7 or less.
    pub last_play_was_seven: bool,

    /// Set together with `GameStatus::Finished`.
    pub winner: Option<PlayerId>,

    /// Cards burned out of the game by tens.
    ///
    /// Defaults to 0 when missing from self-describing formats such as JSON.
    /// The bincode codec is positional and always expects the field.
    #[serde(default)]
    pub burned_count: usize,
}

impl GameState {
    /// An empty table waiting for players.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        let seat = self.seat_of(id)?;
        self.players.get_mut(seat)
    }

    #[must_use]
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard_pile.back()
    }

    #[must_use]
    pub fn is_turn_of(&self, id: &PlayerId) -> bool {
        self.current_turn.as_ref() == Some(id)
    }

    /// Seat that follows `seat` in the current direction, wrapping around.
    ///
    /// Disconnected players are not skipped.
    #[must_use]
    pub fn next_seat(&self, seat: usize) -> usize {
        let count = self.players.len() as isize;
        (seat as isize + self.direction.step()).rem_euclid(count) as usize
    }

    /// Pop up to `count` cards off the draw pile.
    pub fn draw(&mut self, count: usize) -> Vector<Card> {
        let mut drawn = Vector::new();
        for _ in 0..count {
            match self.draw_pile.pop_back() {
                Some(card) => drawn.push_back(card),
                None => break,
            }
        }
        drawn
    }

    /// Every card currently on the table, in no particular order.
    pub fn cards_in_play(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(Player::all_cards))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Rank, Suit};

    fn seated(ids: &[&str]) -> GameState {
        let mut state = GameState::new();
        for id in ids {
            state.players.push_back(Player::new(PlayerId::new(*id), *id));
        }
        state
    }

    #[test]
    fn test_new_state_is_waiting() {
        let state = GameState::new();

        assert_eq!(state.status, GameStatus::Waiting);
        assert_eq!(state.direction, Direction::Clockwise);
        assert!(state.current_turn.is_none());
        assert!(state.winner.is_none());
        assert_eq!(state.cards_in_play().count(), 0);
    }

    #[test]
    fn test_next_seat_wraps() {
        let mut state = seated(&["a", "b", "c"]);

        assert_eq!(state.next_seat(0), 1);
        assert_eq!(state.next_seat(2), 0);

        state.direction = Direction::CounterClockwise;
        assert_eq!(state.next_seat(0), 2);
        assert_eq!(state.next_seat(1), 0);
    }

    #[test]
    fn test_draw_from_top() {
        let mut state = GameState::new();
        for i in 0..3 {
            state.draw_pile.push_back(Card::new(CardId::new(i), Suit::Hearts, Rank::Four));
        }

        let drawn = state.draw(5);
        let ids: Vec<u32> = drawn.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![2, 1, 0]);
        assert!(state.draw_pile.is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let state = seated(&["a", "b"]);

        assert_eq!(state.seat_of(&"b".into()), Some(1));
        assert!(state.player(&"z".into()).is_none());
    }

    #[test]
    fn test_status_order() {
        assert!(GameStatus::Waiting < GameStatus::Setup);
        assert!(GameStatus::Setup < GameStatus::Playing);
        assert!(GameStatus::Playing < GameStatus::Finished);
    }

    #[test]
    fn test_direction_reversal() {
        assert_eq!(Direction::Clockwise.reversed(), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.step(), -1);
    }
}
