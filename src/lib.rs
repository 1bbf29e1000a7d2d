//! # nine-game
//!
//! The card-dueling "Nine" game: a nine-turn, simultaneous-reveal duel
//! against a scripted CPU opponent.
//!
//! ## Design Principles
//!
//! 1. **Injected collaborators**: Randomness and persistence are passed
//!    in, never reached for. Tests wire in scripted stand-ins.
//!
//! 2. **Rejected input changes nothing**: Every error leaves the match
//!    exactly as it was, so callers can simply retry.
//!
//! 3. **One owner per match**: A match owns its state and both card pools.
//!    Nothing is shared between matches.
//!
//! ## Modules
//!
//! - `core`: Sides, random sources, configuration
//! - `cards`: Card values and per-side card pools
//! - `rules`: Round resolution and the `GameSession` lifecycle
//! - `strategy`: CPU opponent policies
//! - `records`: High score stores and tracking
//! - `games`: The Nine match state machine and session
//!
//! ## Example
//!
//! ```
//! use nine_game::{GameSession, MemoryStore, NineConfig, NineSession, Winner};
//!
//! let config = NineConfig::default().with_seed(7).with_thinking_delay(std::time::Duration::ZERO);
//! let mut session = NineSession::from_config(config, MemoryStore::new());
//! session.start();
//!
//! for card in (1..=9).rev() {
//!     session.resolve_turn(card).unwrap();
//! }
//!
//! let result = session.end().unwrap();
//! assert!(result.is_new_high_score);
//! assert_eq!(
//!     result.outcome,
//!     Winner::compare(result.player_score, result.opponent_score)
//! );
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod strategy;
pub mod records;
pub mod games;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    GameRng, NineConfig, RandomSource, ScriptedRng, Side, SideMap, DEFAULT_HIGH_SCORE_KEY,
};

pub use crate::cards::{Card, CardPool};

pub use crate::rules::{resolve, GameSession, RoundOutcome, Winner};

pub use crate::strategy::{Decision, OpponentPolicy, Rule, ScriptedOpponent, ThresholdOpponent};

pub use crate::records::{FileStore, HighScoreTracker, MemoryStore, ScoreStore};

pub use crate::games::nine::{
    MatchResult, MatchState, NineMatch, NineSession, Phase, TurnResolved, TOTAL_TURNS,
};

pub use crate::error::{NineError, StoreError};
