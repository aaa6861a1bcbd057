//! Error types.
//!
//! Player-facing failures are values: `apply_action` returns a
//! `RejectReason` and leaves the input state untouched. Loading failures
//! (catalog, configuration, setup, codec) each get their own enum.
//!
//! Engine defects are not represented here. A broken invariant (CC above the
//! cap, a card listed in two zones) panics with a descriptive message.

use thiserror::Error;

use crate::core::{InstanceId, PlayerId};

/// Why an action was rejected. No mutation occurs when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("the game is already over")]
    GameOver,

    #[error("action not allowed in the current phase")]
    WrongPhase,

    #[error("{0} does not hold the current decision")]
    NotYourDecision(PlayerId),

    #[error("no card with id {0}")]
    CardNotFound(InstanceId),

    #[error("{0} is not in the acting player's hand")]
    NotInHand(InstanceId),

    #[error("{0} is not in play under the acting player's control")]
    NotInPlay(InstanceId),

    #[error("{0} is not a Toy")]
    NotAToy(InstanceId),

    #[error("insufficient CC: need {needed}, have {available}")]
    InsufficientCc { needed: u32, available: u8 },

    #[error("illegal target {0}")]
    InvalidTarget(InstanceId),

    #[error("expected between {min} and {max} targets, got {got}")]
    WrongTargetCount { min: usize, max: usize, got: usize },

    #[error("{0} cannot tussle")]
    CannotTussle(InstanceId),

    #[error("direct attack not allowed while the opponent has Toys in play")]
    DirectAttackNotAllowed,

    #[error("direct attack limit reached for this turn")]
    DirectAttackLimit,

    #[error("the opponent's hand is empty")]
    OpponentHandEmpty,

    #[error("{source_card} has no activated ability {index}")]
    NoSuchAbility { source_card: InstanceId, index: u8 },

    #[error("repeat count must be at least 1")]
    ZeroRepeat,

    #[error("payment method not available for this card")]
    InvalidPayment,

    #[error("{0} is not an interrupt card")]
    NotAnInterrupt(InstanceId),

    #[error("no decision is pending")]
    NoPendingDecision,

    #[error("a pending decision must be resolved first")]
    DecisionPending,
}

/// Errors raised while loading the card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown card {0:?}")]
    UnknownCard(String),

    #[error("duplicate card {0:?}")]
    DuplicateCard(String),

    #[error("card {card:?}: bad effect token {token:?}: {reason}")]
    BadToken {
        card: String,
        token: String,
        reason: String,
    },

    #[error("Toy {0:?} has no stats")]
    MissingStats(String),
}

/// Errors raised while loading a rules configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised while creating a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{player} brought {found} cards, expected {expected}")]
    WrongDeckSize {
        player: PlayerId,
        expected: usize,
        found: usize,
    },

    #[error("unknown card {0:?}")]
    UnknownCard(String),
}

/// Errors raised while encoding or decoding a game state.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec error: {0}")]
    Binary(#[from] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_messages() {
        let err = RejectReason::InsufficientCc {
            needed: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "insufficient CC: need 3, have 1");
        assert_eq!(
            RejectReason::NotInHand(InstanceId(4)).to_string(),
            "Instance(4) is not in the acting player's hand"
        );
    }

    #[test]
    fn test_catalog_error_from_json() {
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err: CatalogError = json_err.into();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
