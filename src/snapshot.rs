//! Binary snapshot codec for broadcasting `GameState`.
//!
//! Hosts ship the whole state after every accepted action; receivers decode
//! it and replace their local engine state wholesale.
//!
//! ```
//! use castle_engine::{snapshot, GameState};
//!
//! let state = GameState::new();
//! let bytes = snapshot::encode(&state).unwrap();
//! assert_eq!(snapshot::decode(&bytes).unwrap(), state);
//! ```

use thiserror::Error;

use crate::core::GameState;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

/// Serialize a state for the broadcast channel.
pub fn encode(state: &GameState) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(state).map_err(SnapshotError::Encode)
}

/// Deserialize a received state.
pub fn decode(bytes: &[u8]) -> Result<GameState, SnapshotError> {
    bincode::deserialize(bytes).map_err(SnapshotError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CastleConfig;
    use crate::rules::CastleEngine;

    #[test]
    fn test_dealt_state_round_trips() {
        let mut engine = CastleEngine::new(CastleConfig::default(), 8).unwrap();
        engine.seed_roster([("a", "Alice"), ("b", "Bob"), ("c", "Cleo")]);
        engine.start_game().unwrap();

        let bytes = encode(engine.state()).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(&decoded, engine.state());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = decode(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }
}
