//! The Castle rules engine.
//!
//! `CastleEngine` owns one `GameState` and exposes every transition a host
//! may request:
//! - Lobby: `add_player`, `seed_roster`, `remove_player`, `start_game`
//! - Setup: `swap_cards`, `set_ready`
//! - Playing: `play_cards`, `pick_up_discard`, `apply_move`
//!
//! Every operation is all-or-nothing. Playing-phase transitions are staged
//! on an O(1) clone of the state and committed only when they succeed, so a
//! rejected call leaves the state exactly as it was.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::error::RuleError;
use super::play::{self, PlayOutcome, Selection};
use crate::cards::{build_deck, CardId, Rank};
use crate::core::{
    CastleConfig, ConfigError, Direction, GameRng, GameRngState, GameState, GameStatus, Layer,
    Move, Player, PlayerId,
};

/// How a finished game ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// First player to clear all three layers.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
        }
    }
}

/// Rules engine for one table.
#[derive(Clone, Debug)]
pub struct CastleEngine {
    config: CastleConfig,
    state: GameState,
    rng: GameRng,
}

impl Default for CastleEngine {
    /// Empty table with the standard configuration and an entropy seed.
    fn default() -> Self {
        Self {
            config: CastleConfig::default(),
            state: GameState::new(),
            rng: GameRng::from_entropy(),
        }
    }
}

impl CastleEngine {
    /// Empty table with a fixed seed for deterministic deals.
    pub fn new(config: CastleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::new(),
            rng: GameRng::new(seed),
        })
    }

    /// Rehydrate from a received snapshot.
    ///
    /// `config` must match the host's: it is not part of `GameState`, and
    /// `hand_size` decides how far hands are refilled after each play.
    pub fn from_snapshot(state: GameState, config: CastleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            rng: GameRng::from_entropy(),
        })
    }

    /// Rehydrate from a snapshot with explicit configuration and seed.
    pub fn from_snapshot_seeded(
        state: GameState,
        config: CastleConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            rng: GameRng::new(seed),
        })
    }

    /// Resume a host from a checkpoint, RNG stream included, so a deal
    /// that has not happened yet comes out as it would have.
    pub fn resume(
        state: GameState,
        config: CastleConfig,
        rng: &GameRngState,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state,
            rng: GameRng::from_state(rng),
        })
    }

    /// Checkpoint of the RNG stream, for `resume`.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &CastleConfig {
        &self.config
    }

    /// Adopt a broadcast snapshot wholesale.
    pub fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }

    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.state.winner.as_ref()
    }

    /// `Some` once the game is finished.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if self.state.status != GameStatus::Finished {
            return None;
        }
        self.state.winner.clone().map(GameResult::Winner)
    }

    // === Lobby ===

    /// Seat a new player. Returns false, changing nothing, outside the
    /// waiting phase or when the id is already seated.
    pub fn add_player(&mut self, id: impl Into<PlayerId>, name: impl Into<String>) -> bool {
        let id = id.into();
        if self.state.status != GameStatus::Waiting {
            debug!(
                player = %id,
                status = %self.state.status,
                "add_player ignored: game already started"
            );
            return false;
        }
        if self.state.seat_of(&id).is_some() {
            debug!(player = %id, "add_player ignored: already seated");
            return false;
        }

        debug!(player = %id, "player seated");
        self.state.players.push_back(Player::new(id, name));
        true
    }

    /// Seat every `(identity, display name)` pair from the host's presence
    /// registry, in order. Returns how many were newly seated.
    pub fn seed_roster<I, P, N>(&mut self, roster: I) -> usize
    where
        I: IntoIterator<Item = (P, N)>,
        P: Into<PlayerId>,
        N: Into<String>,
    {
        roster
            .into_iter()
            .map(|(id, name)| self.add_player(id, name))
            .filter(|&seated| seated)
            .count()
    }

    /// Remove a player from the lobby, or mark them disconnected once a game
    /// is under way. A disconnected player keeps their seat and cards.
    ///
    /// Returns false if no such player is seated.
    pub fn remove_player(&mut self, id: &PlayerId) -> bool {
        let Some(seat) = self.state.seat_of(id) else {
            return false;
        };

        if self.state.status == GameStatus::Waiting {
            self.state.players.remove(seat);
            debug!(player = %id, "player left the lobby");
        } else if let Some(player) = self.state.players.get_mut(seat) {
            player.connected = false;
            debug!(player = %id, "player disconnected, seat kept");
        }
        true
    }

    /// Shuffle, deal and move to the setup phase.
    ///
    /// Each player gets their face-down row, then their face-up row, then
    /// their hand. A random seat starts, and the top draw card seeds the
    /// discard pile.
    pub fn start_game(&mut self) -> Result<(), RuleError> {
        require_status(&self.state, GameStatus::Waiting).map_err(|e| rejected("start_game", e))?;

        let seated = self.state.player_count();
        if seated < self.config.min_players {
            return Err(rejected(
                "start_game",
                RuleError::NotEnoughPlayers {
                    needed: self.config.min_players,
                    seated,
                },
            ));
        }

        let decks = self.config.deck_count_for(seated);
        let state = &mut self.state;
        state.discard_pile = Vector::new();
        state.winner = None;
        state.direction = Direction::Clockwise;
        state.last_play_was_seven = false;
        state.burned_count = 0;
        state.draw_pile = build_deck(decks, &mut self.rng).into_iter().collect();

        for seat in 0..seated {
            let face_down = state.draw(self.config.face_down_count);
            let face_up = state.draw(self.config.face_up_count);
            let hand = state.draw(self.config.hand_size);

            let player = &mut state.players[seat];
            player.ready = false;
            player.face_down = face_down;
            player.face_up = face_up;
            player.hand = hand;
        }

        let start = self.rng.below(seated);
        state.current_turn = Some(state.players[start].id.clone());

        if let Some(card) = state.draw_pile.pop_back() {
            state.discard_pile.push_back(card);
        }

        state.status = GameStatus::Setup;
        info!(
            players = seated,
            decks,
            seed = self.rng.seed(),
            starter = %state.players[start].id,
            "game dealt, entering setup"
        );
        Ok(())
    }

    // === Setup ===

    /// Exchange one hand card with one face-up card.
    ///
    /// Allowed any number of times until the player marks ready.
    pub fn swap_cards(
        &mut self,
        player: &PlayerId,
        hand_card: CardId,
        face_up_card: CardId,
    ) -> Result<(), RuleError> {
        self.transact("swap_cards", player, |state, _| {
            require_status(state, GameStatus::Setup)?;
            let seated = state
                .player_mut(player)
                .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))?;
            if seated.ready {
                return Err(RuleError::AlreadyReady(player.clone()));
            }

            let hand_pos = seated
                .position_in(Layer::Hand, hand_card)
                .ok_or(RuleError::CardNotFound)?;
            let up_pos = seated
                .position_in(Layer::FaceUp, face_up_card)
                .ok_or(RuleError::CardNotFound)?;

            let from_hand = seated.hand[hand_pos];
            let from_table = seated.face_up.set(up_pos, from_hand);
            seated.hand.set(hand_pos, from_table);
            Ok(())
        })
    }

    /// Lock in a player's face-up choice. Play starts once everyone is ready.
    pub fn set_ready(&mut self, player: &PlayerId) -> Result<(), RuleError> {
        self.transact("set_ready", player, |state, _| {
            require_status(state, GameStatus::Setup)?;
            let seated = state
                .player_mut(player)
                .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))?;
            if seated.ready {
                return Err(RuleError::AlreadyReady(player.clone()));
            }
            seated.ready = true;

            if state.players.iter().all(|p| p.ready) {
                state.status = GameStatus::Playing;
                info!("all players ready, play begins");
            }
            Ok(())
        })
    }

    // === Playing ===

    /// Play one or more same-rank cards from the player's active layer.
    ///
    /// A face-down card that turns out to be unplayable is not a rejection:
    /// the player takes it and the whole pile into hand, and the turn moves
    /// on (`PlayOutcome::BlindPickup`).
    pub fn play_cards(
        &mut self,
        player: &PlayerId,
        card_ids: &[CardId],
    ) -> Result<PlayOutcome, RuleError> {
        self.transact("play_cards", player, |state, config| {
            resolve_play(state, config, player, card_ids)
        })
    }

    /// Take the whole discard pile into hand and pass the turn.
    ///
    /// Picking up an empty pile is allowed.
    pub fn pick_up_discard(&mut self, player: &PlayerId) -> Result<PlayOutcome, RuleError> {
        self.transact("pick_up_discard", player, |state, _| {
            require_status(state, GameStatus::Playing)?;
            let seat = require_turn(state, player)?;

            let pile = std::mem::take(&mut state.discard_pile);
            let count = pile.len();
            state.players[seat].hand.append(pile);
            state.last_play_was_seven = false;
            let next = advance_turn(state, seat);

            debug!(player = %player, count, "picked up discard pile");
            Ok(PlayOutcome::PickedUp { count, next })
        })
    }

    /// Apply a `Move` built by a host or bot.
    pub fn apply_move(&mut self, player: &PlayerId, mv: &Move) -> Result<PlayOutcome, RuleError> {
        match mv {
            Move::Play(cards) => self.play_cards(player, cards),
            Move::PickUp => self.pick_up_discard(player),
        }
    }

    /// Dry-run a play without touching the state.
    ///
    /// A face-down attempt always counts as accepted: when the card turns
    /// out to be unplayable the play still succeeds as a pickup.
    #[must_use]
    pub fn would_accept(&self, player: &PlayerId, card_ids: &[CardId]) -> bool {
        let mut draft = self.state.clone();
        resolve_play(&mut draft, &self.config, player, card_ids).is_ok()
    }

    /// Every move `player` may make right now.
    ///
    /// Empty unless the game is playing and it is `player`'s turn. Otherwise
    /// picking up is always listed last. From the hand or face-up row each
    /// playable card is offered alone, plus one batch per rank held more
    /// than once. Each face-down card is offered as a blind attempt.
    #[must_use]
    pub fn legal_moves(&self, player: &PlayerId) -> Vec<Move> {
        if self.state.status != GameStatus::Playing || !self.state.is_turn_of(player) {
            return Vec::new();
        }
        let Some(seated) = self.state.player(player) else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        match seated.active_layer() {
            Some(Layer::FaceDown) => {
                moves.extend(seated.face_down.iter().map(|c| Move::play(&[c.id])));
            }
            Some(layer) => {
                let mut groups: Vec<(Rank, SmallVec<[CardId; 4]>)> = Vec::new();
                for card in seated.layer(layer).iter() {
                    match groups.iter_mut().find(|(rank, _)| *rank == card.rank) {
                        Some((_, ids)) => ids.push(card.id),
                        None => groups.push((card.rank, SmallVec::from_slice(&[card.id]))),
                    }
                }

                let top = self.state.top_discard();
                for (rank, ids) in groups {
                    if !play::is_playable(rank, top, self.state.last_play_was_seven) {
                        continue;
                    }
                    moves.extend(ids.iter().map(|&id| Move::play(&[id])));
                    if ids.len() > 1 {
                        moves.push(Move::Play(ids));
                    }
                }
            }
            None => {}
        }

        moves.push(Move::PickUp);
        moves
    }

    /// Run `op` on a draft of the state, committing only on success.
    fn transact<T>(
        &mut self,
        name: &'static str,
        player: &PlayerId,
        op: impl FnOnce(&mut GameState, &CastleConfig) -> Result<T, RuleError>,
    ) -> Result<T, RuleError> {
        let mut draft = self.state.clone();
        match op(&mut draft, &self.config) {
            Ok(value) => {
                self.state = draft;
                Ok(value)
            }
            Err(err) => {
                debug!(op = name, player = %player, reason = %err, "rejected");
                Err(err)
            }
        }
    }
}

fn rejected(name: &'static str, err: RuleError) -> RuleError {
    debug!(op = name, reason = %err, "rejected");
    err
}

fn require_status(state: &GameState, expected: GameStatus) -> Result<(), RuleError> {
    if state.status == expected {
        Ok(())
    } else {
        Err(RuleError::wrong_phase(expected, state.status))
    }
}

/// Check it is `player`'s turn and return their seat.
fn require_turn(state: &GameState, player: &PlayerId) -> Result<usize, RuleError> {
    if !state.is_turn_of(player) {
        return Err(RuleError::NotYourTurn(player.clone()));
    }
    state
        .seat_of(player)
        .ok_or_else(|| RuleError::UnknownPlayer(player.clone()))
}

/// Hand the turn to the next seat and return who that is.
fn advance_turn(state: &mut GameState, seat: usize) -> PlayerId {
    let next = state.players[state.next_seat(seat)].id.clone();
    state.current_turn = Some(next.clone());
    next
}

fn resolve_play(
    state: &mut GameState,
    config: &CastleConfig,
    player: &PlayerId,
    card_ids: &[CardId],
) -> Result<PlayOutcome, RuleError> {
    require_status(state, GameStatus::Playing)?;
    let seat = require_turn(state, player)?;

    let selection = play::select(&state.players[seat], card_ids)?;
    let playable =
        play::is_playable(selection.rank, state.top_discard(), state.last_play_was_seven);

    if !playable {
        if selection.layer == Layer::FaceDown {
            return Ok(blind_pickup(state, seat, selection));
        }
        return Err(RuleError::IllegalPlay);
    }

    let played = selection.ids();
    let rank = selection.rank;
    let count = selection.cards.len();
    state.players[seat]
        .layer_mut(selection.layer)
        .retain(|c| !played.contains(&c.id));

    let burned = rank.burns_pile();
    if burned {
        state.burned_count += state.discard_pile.len() + count;
        state.discard_pile.clear();
    } else {
        state.discard_pile.extend(selection.cards.iter().copied());
    }

    let seated = &mut state.players[seat];
    while seated.hand.len() < config.hand_size {
        match state.draw_pile.pop_back() {
            Some(card) => seated.hand.push_back(card),
            None => break,
        }
    }

    if seated.is_cleared() {
        state.winner = Some(player.clone());
        state.status = GameStatus::Finished;
        info!(winner = %player, "game finished");
        return Ok(PlayOutcome::Won(player.clone()));
    }

    state.last_play_was_seven = rank.caps_next_play();
    let next = if rank.grants_replay() {
        player.clone()
    } else {
        advance_turn(state, seat)
    };

    debug!(player = %player, ?rank, count, burned, next = %next, "cards played");
    Ok(PlayOutcome::Played {
        rank,
        count,
        burned,
        next,
    })
}

/// Failed blind play: reveal the cards, hand over the pile, pass the turn.
fn blind_pickup(state: &mut GameState, seat: usize, selection: Selection) -> PlayOutcome {
    let revealed = selection.ids();
    let pile = std::mem::take(&mut state.discard_pile);
    let picked_up = pile.len();

    let seated = &mut state.players[seat];
    seated.face_down.retain(|c| !revealed.contains(&c.id));
    seated.hand.append(pile);
    seated.hand.extend(selection.cards.iter().copied());

    state.last_play_was_seven = false;
    let next = advance_turn(state, seat);

    debug!(
        player = %state.players[seat].id,
        picked_up,
        "blind play failed, pile picked up"
    );
    PlayOutcome::BlindPickup {
        revealed: selection.cards,
        picked_up,
        next,
    }
}
