//! Player identification and per-player card layers.
//!
//! ## PlayerId
//!
//! Opaque identity string assigned by the host's connection layer.
//!
//! ## Player
//!
//! One seat at the table: a hand, a face-up row, a face-down row, plus the
//! connectivity and setup-ready flags.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Stable player identity, as handed out by the host.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three card layers a player clears in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Hand,
    FaceUp,
    FaceDown,
}

/// One seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub connected: bool,
    pub ready: bool,
    pub hand: Vector<Card>,
    pub face_up: Vector<Card>,
    /// Index `i` sits beneath `face_up[i]` on the table.
    pub face_down: Vector<Card>,
}

impl Player {
    /// A freshly seated player: no cards, connected, not ready.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            connected: true,
            ready: false,
            hand: Vector::new(),
            face_up: Vector::new(),
            face_down: Vector::new(),
        }
    }

    #[must_use]
    pub fn layer(&self, layer: Layer) -> &Vector<Card> {
        match layer {
            Layer::Hand => &self.hand,
            Layer::FaceUp => &self.face_up,
            Layer::FaceDown => &self.face_down,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut Vector<Card> {
        match layer {
            Layer::Hand => &mut self.hand,
            Layer::FaceUp => &mut self.face_up,
            Layer::FaceDown => &mut self.face_down,
        }
    }

    /// The layer this player must play from: the first non-empty of hand,
    /// face-up, face-down. `None` once all three are empty.
    #[must_use]
    pub fn active_layer(&self) -> Option<Layer> {
        [Layer::Hand, Layer::FaceUp, Layer::FaceDown]
            .into_iter()
            .find(|&layer| !self.layer(layer).is_empty())
    }

    /// All three layers are empty.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.active_layer().is_none()
    }

    /// Total cards held across the three layers.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.face_up.len() + self.face_down.len()
    }

    /// Index of a card within one layer.
    #[must_use]
    pub fn position_in(&self, layer: Layer, card: CardId) -> Option<usize> {
        self.layer(layer).iter().position(|c| c.id == card)
    }

    /// Iterate every card this player holds.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.hand
            .iter()
            .chain(self.face_up.iter())
            .chain(self.face_down.iter())
    }
}
