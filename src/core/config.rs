//! Match configuration.
//!
//! `NineConfig` is the only knob set the application passes in. It can
//! be built in code with the `with_*` methods or parsed from JSON, in
//! which case missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Storage key for the persisted best player score.
pub const DEFAULT_HIGH_SCORE_KEY: &str = "nine-game_highscore";

/// Nominal opponent "thinking" time between confirmation and reveal.
pub const DEFAULT_THINKING_DELAY_MS: u64 = 1000;

/// Configuration for a Nine session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NineConfig {
    /// Cosmetic delay before the opponent reveals, in milliseconds.
    /// Zero disables the delay entirely.
    pub thinking_delay_ms: u64,

    /// Key the high score is stored under.
    pub high_score_key: String,

    /// Seed for the opponent RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for NineConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            high_score_key: DEFAULT_HIGH_SCORE_KEY.to_string(),
            seed: None,
        }
    }
}

impl NineConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the thinking delay.
    #[must_use]
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the high score storage key.
    #[must_use]
    pub fn with_high_score_key(mut self, key: impl Into<String>) -> Self {
        self.high_score_key = key.into();
        self
    }

    /// Fix the opponent RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Thinking delay as a `Duration`.
    #[must_use]
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// Build the opponent RNG this config describes.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}
