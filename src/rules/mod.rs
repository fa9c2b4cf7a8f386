//! Castle rules: play validation and the engine that applies them.
//!
//! - `play`: pure checks (active layer, rank uniformity, pile comparison)
//! - `engine`: `CastleEngine`, the state machine over `GameState`
//! - `error`: why an operation was rejected

pub mod engine;
pub mod error;
pub mod play;

pub use engine::{CastleEngine, GameResult};
pub use error::RuleError;
pub use play::{is_playable, select, PlayOutcome, Selection};
