//! Opponent that plays a predetermined order.

use std::collections::VecDeque;

use super::opponent::{Decision, OpponentPolicy, Rule};
use crate::cards::{Card, CardPool};

/// Plays queued card values in order.
///
/// Queued values that are no longer available are skipped; once the
/// script runs dry the lowest available card is played.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOpponent {
    script: VecDeque<u8>,
}

impl ScriptedOpponent {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn decide(&mut self, pool: &CardPool, _score_diff: i32, _turn_number: u8) -> Option<Decision> {
        while let Some(value) = self.script.pop_front() {
            if pool.contains(value) {
                return Card::new(value).map(|card| Decision::new(card, Rule::Scripted));
            }
        }
        pool.lowest().map(|card| Decision::new(card, Rule::Scripted))
    }
}
