//! Shared helpers for the integration suites.

#![allow(dead_code)]

use castle_engine::{
    snapshot, Card, CardId, CastleConfig, CastleEngine, GameState, GameStatus, Player, PlayerId,
    Rank, Suit,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a test-writer subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then "warn".
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

pub fn pid(id: &str) -> PlayerId {
    PlayerId::new(id)
}

/// A card with a given id; suit cycles with the id so batches look real.
pub fn card(id: u32, rank: Rank) -> Card {
    Card::new(CardId::new(id), Suit::ALL[id as usize % 4], rank)
}

pub fn ids(cards: &[Card]) -> Vec<CardId> {
    cards.iter().map(|c| c.id).collect()
}

/// Bincode bytes of the engine's state, for byte-for-byte comparisons.
pub fn state_bytes(engine: &CastleEngine) -> Vec<u8> {
    snapshot::encode(engine.state()).expect("state encodes")
}

/// Sorted ids of every card on the table.
pub fn ids_in_play(state: &GameState) -> Vec<CardId> {
    let mut ids: Vec<CardId> = state.cards_in_play().map(|c| c.id).collect();
    ids.sort_unstable();
    ids
}

/// Builds a table already in the playing phase with hand-picked cards.
#[derive(Default)]
pub struct TableBuilder {
    players: Vec<Player>,
    discard: Vec<Card>,
    draw: Vec<Card>,
    turn: usize,
    after_seven: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seat(mut self, id: &str, hand: &[Card], face_up: &[Card], face_down: &[Card]) -> Self {
        let mut player = Player::new(pid(id), id.to_uppercase());
        player.ready = true;
        player.hand = hand.iter().copied().collect();
        player.face_up = face_up.iter().copied().collect();
        player.face_down = face_down.iter().copied().collect();
        self.players.push(player);
        self
    }

    pub fn discard(mut self, cards: &[Card]) -> Self {
        self.discard = cards.to_vec();
        self
    }

    pub fn draw_pile(mut self, cards: &[Card]) -> Self {
        self.draw = cards.to_vec();
        self
    }

    pub fn turn(mut self, seat: usize) -> Self {
        self.turn = seat;
        self
    }

    pub fn after_seven(mut self) -> Self {
        self.after_seven = true;
        self
    }

    pub fn build(self) -> CastleEngine {
        let mut state = GameState::new();
        state.current_turn = Some(self.players[self.turn].id.clone());
        state.players = self.players.into_iter().collect();
        state.discard_pile = self.discard.into_iter().collect();
        state.draw_pile = self.draw.into_iter().collect();
        state.last_play_was_seven = self.after_seven;
        state.status = GameStatus::Playing;
        CastleEngine::from_snapshot_seeded(state, CastleConfig::default(), 0)
            .expect("default config is valid")
    }
}

/// Seat `names`, deal, and mark everyone ready.
pub fn dealt_game(names: &[&str], seed: u64) -> CastleEngine {
    let mut engine = CastleEngine::new(CastleConfig::default(), seed).expect("valid config");
    engine.seed_roster(names.iter().map(|n| (*n, *n)));
    engine.start_game().expect("enough players");
    for name in names {
        engine.set_ready(&pid(name)).expect("player can ready up");
    }
    engine
}
