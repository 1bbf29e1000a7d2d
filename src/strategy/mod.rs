//! CPU opponent strategies.
//!
//! Strategies are trait-based so the match machinery never depends on a
//! particular personality:
//! - `ThresholdOpponent`: The shipped opponent, a short list of score and
//!   turn thresholds with injected randomness
//! - `ScriptedOpponent`: Plays a fixed card order (tests, tutorials, replays)

pub mod opponent;
pub mod scripted;

pub use opponent::{
    Decision, OpponentPolicy, Rule, ThresholdOpponent, ENDGAME_TURNS, LEAD_THRESHOLD, MIDDLE_BAND,
    MIDDLE_PROBABILITY, SPREAD,
};
pub use scripted::ScriptedOpponent;
