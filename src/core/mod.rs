//! Core types: sides, randomness, configuration.
//!
//! Everything here is independent of the match rules. The match state
//! machine in `games::nine` builds on these.

pub mod side;
pub mod rng;
pub mod config;

pub use side::{Side, SideMap};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use config::{NineConfig, DEFAULT_HIGH_SCORE_KEY, DEFAULT_THINKING_DELAY_MS};
