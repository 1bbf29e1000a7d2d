//! Best-score tracking.

use tracing::{debug, warn};

use super::store::ScoreStore;

/// Keeps the best player score, "higher is better".
///
/// The record is read from the store once, at construction. After that
/// the in-memory copy is authoritative: a failed write is logged and
/// otherwise ignored, and a failed read counts as "no record".
#[derive(Debug)]
pub struct HighScoreTracker<S> {
    store: S,
    key: String,
    best: Option<u32>,
}

impl<S: ScoreStore> HighScoreTracker<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let best = match store.get_high_score(&key) {
            Ok(best) => best,
            Err(err) => {
                warn!(key = %key, error = %err, "high score unreadable; starting without a record");
                None
            }
        };
        Self { store, key, best }
    }

    /// Best score seen, stored or submitted.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.best
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Would `score` beat the current record?
    #[must_use]
    pub fn is_record(&self, score: u32) -> bool {
        self.best.map_or(true, |best| score > best)
    }

    /// Offer a finished match's player score.
    ///
    /// Returns whether it is a new record. Only records are written.
    pub fn submit(&mut self, score: u32) -> bool {
        if !self.is_record(score) {
            return false;
        }

        debug!(key = %self.key, previous = ?self.best, score, "new high score");
        self.best = Some(score);
        if let Err(err) = self.store.set_high_score(&self.key, score) {
            warn!(key = %self.key, score, error = %err, "failed to persist high score");
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
