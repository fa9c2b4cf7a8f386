//! Rejection reasons.
//!
//! Every rejected operation leaves the state untouched; the variant only
//! tells the host why, so it can show "invalid move" feedback.

use thiserror::Error;

use crate::core::{GameStatus, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("operation needs status {expected}, game is {actual}")]
    WrongPhase {
        expected: GameStatus,
        actual: GameStatus,
    },
    #[error("need at least {needed} players, have {seated}")]
    NotEnoughPlayers { needed: usize, seated: usize },
    #[error("no seated player {0}")]
    UnknownPlayer(PlayerId),
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("{0} is already ready")]
    AlreadyReady(PlayerId),
    #[error("card not found in the expected layer")]
    CardNotFound,
    #[error("none of the nominated cards are in the active layer")]
    NoMatchingCards,
    #[error("all cards in a play must share one rank")]
    MixedRanks,
    #[error("play does not beat the discard pile")]
    IllegalPlay,
}

impl RuleError {
    pub(crate) fn wrong_phase(expected: GameStatus, actual: GameStatus) -> Self {
        RuleError::WrongPhase { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RuleError::wrong_phase(GameStatus::Playing, GameStatus::Setup);
        assert_eq!(err.to_string(), "operation needs status playing, game is setup");

        let err = RuleError::NotYourTurn(PlayerId::new("bob"));
        assert_eq!(err.to_string(), "it is not bob's turn");
    }
}
