//! Error types.
//!
//! `NineError` covers caller misuse of a match; every variant is
//! recoverable and leaves the match exactly as it was. `StoreError` comes
//! from persistence backends and never escapes a match.

use thiserror::Error;

use crate::core::Side;
use crate::games::nine::Phase;

/// Errors from driving a Nine match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NineError {
    #[error("invalid selection: card {0} is not available")]
    InvalidCard(u8),
    #[error("invalid selection: no card selected")]
    NothingSelected,
    #[error("cannot {action} during {phase} phase")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("session has not been started")]
    NotStarted,
    #[error("opponent deliberation was cancelled")]
    Cancelled,
    #[error("{0} has no cards left")]
    PoolExhausted(Side),
    #[error("opponent chose card {0}, which it no longer holds")]
    IllegalOpponentCard(u8),
}

impl NineError {
    /// True for the errors raised by picking the wrong card (or none).
    #[must_use]
    pub fn is_invalid_selection(&self) -> bool {
        matches!(self, NineError::InvalidCard(_) | NineError::NothingSelected)
    }

    /// True for operations attempted in the wrong phase.
    #[must_use]
    pub fn is_invalid_phase(&self) -> bool {
        matches!(self, NineError::InvalidPhase { .. })
    }
}

/// Errors from a `ScoreStore` backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("stored value for {key} is not a score: {value:?}")]
    Corrupt { key: String, value: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_grouping() {
        assert!(NineError::InvalidCard(3).is_invalid_selection());
        assert!(NineError::NothingSelected.is_invalid_selection());
        assert!(!NineError::Cancelled.is_invalid_selection());

        let phase = NineError::InvalidPhase {
            action: "confirm",
            phase: Phase::Revealed,
        };
        assert!(phase.is_invalid_phase());
        assert!(!phase.is_invalid_selection());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            NineError::InvalidCard(3).to_string(),
            "invalid selection: card 3 is not available"
        );
        assert_eq!(
            NineError::InvalidPhase {
                action: "select",
                phase: Phase::Complete
            }
            .to_string(),
            "cannot select during complete phase"
        );
        assert_eq!(NineError::PoolExhausted(Side::Opponent).to_string(), "opponent has no cards left");
    }
}
