//! Session wiring for Nine.
//!
//! `NineSession` is what the application holds: a match plus the
//! collaborators it needs, all injected at construction. The high score
//! tracker outlives individual matches, so `init` starts a rematch
//! without losing the record.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::machine::{MatchResult, NineMatch, TurnResolved};
use crate::core::NineConfig;
use crate::error::NineError;
use crate::records::{HighScoreTracker, MemoryStore, ScoreStore};
use crate::rules::GameSession;
use crate::strategy::{OpponentPolicy, ThresholdOpponent};

/// A Nine match with its opponent, record keeping and config.
#[derive(Debug)]
pub struct NineSession<O = ThresholdOpponent, S = MemoryStore> {
    config: NineConfig,
    game: NineMatch,
    opponent: O,
    tracker: HighScoreTracker<S>,
    started: bool,
}

impl<S: ScoreStore> NineSession<ThresholdOpponent, S> {
    /// Session with the shipped opponent, seeded from `config`.
    pub fn from_config(config: NineConfig, store: S) -> Self {
        let opponent = ThresholdOpponent::new(config.rng());
        Self::new(config, opponent, store)
    }
}

impl<O: OpponentPolicy, S: ScoreStore> NineSession<O, S> {
    pub fn new(config: NineConfig, opponent: O, store: S) -> Self {
        let tracker = HighScoreTracker::new(store, config.high_score_key.clone());
        Self {
            config,
            game: NineMatch::new(),
            opponent,
            tracker,
            started: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NineConfig {
        &self.config
    }

    /// The match in progress.
    #[must_use]
    pub fn game(&self) -> &NineMatch {
        &self.game
    }

    /// Direct access for UI glue that drives the split
    /// select/confirm/reveal cycle with its own timer.
    pub fn game_mut(&mut self) -> &mut NineMatch {
        &mut self.game
    }

    pub fn opponent_mut(&mut self) -> &mut O {
        &mut self.opponent
    }

    #[must_use]
    pub fn tracker(&self) -> &HighScoreTracker<S> {
        &self.tracker
    }

    /// Gate for player input: started, selecting, opponent not deliberating.
    ///
    /// `play_turn` borrows the session for the whole thinking delay, so
    /// this can't be polled mid-delay. UI code that needs the gate while
    /// the opponent thinks should drive `select`, `confirm` and `reveal`
    /// through `game_mut` and run its own timer.
    #[must_use]
    pub fn can_accept(&self) -> bool {
        self.started && self.game.can_accept()
    }

    fn ensure_started(&self) -> Result<(), NineError> {
        if self.started {
            Ok(())
        } else {
            Err(NineError::NotStarted)
        }
    }

    /// Play one turn with the opponent's thinking delay.
    ///
    /// The player's card is confirmed, then the configured delay runs
    /// before the opponent reveals. Cancelling `cancel` during the delay,
    /// or dropping the future, withdraws the confirmation: the turn goes
    /// back to selecting with no card used and the selection kept.
    pub async fn play_turn(
        &mut self,
        card: u8,
        cancel: &CancellationToken,
    ) -> Result<TurnResolved, NineError> {
        self.ensure_started()?;
        if cancel.is_cancelled() {
            return Err(NineError::Cancelled);
        }

        self.game.select(card)?;
        self.game.confirm()?;

        let delay = self.config.thinking_delay();
        if !delay.is_zero() {
            let deliberation = Deliberation::new(&mut self.game);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(turn = deliberation.game.state().turn_number(), "deliberation cancelled");
                    return Err(NineError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }
            deliberation.disarm();
        }

        if let Err(err) = self.game.reveal(&mut self.opponent) {
            self.game.withdraw();
            return Err(err);
        }
        self.game.resolve_turn()
    }
}

impl<O: OpponentPolicy, S: ScoreStore> GameSession for NineSession<O, S> {
    type Move = u8;
    type Event = TurnResolved;
    type Outcome = MatchResult;
    type Error = NineError;

    fn init(&mut self) {
        self.game = NineMatch::new();
        self.started = false;
    }

    fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            high_score = ?self.tracker.best(),
            thinking_delay_ms = self.config.thinking_delay_ms,
            "match started"
        );
    }

    /// One turn with no thinking delay.
    fn resolve_turn(&mut self, card: u8) -> Result<TurnResolved, NineError> {
        self.ensure_started()?;
        self.game.play_turn(card, &mut self.opponent)
    }

    fn end(&mut self) -> Result<MatchResult, NineError> {
        self.ensure_started()?;
        self.game.finish(&mut self.tracker)
    }

    fn is_over(&self) -> bool {
        self.game.state().is_complete()
    }
}

/// Withdraws a confirmation on drop unless disarmed.
struct Deliberation<'a> {
    game: &'a mut NineMatch,
    armed: bool,
}

impl<'a> Deliberation<'a> {
    fn new(game: &'a mut NineMatch) -> Self {
        Self { game, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Deliberation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.game.withdraw();
        }
    }
}
