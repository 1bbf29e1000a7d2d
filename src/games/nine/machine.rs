//! The Nine match state machine.
//!
//! ```text
//! SELECTING ──confirm──▶ (awaiting opponent) ──reveal──▶ REVEALED
//!     ▲                        │ withdraw                    │ resolve_turn
//!     │◀───────────────────────┘                             │
//!     └────────────── turn < 9 ◀─────────────────────────────┤
//!                                          turn == 9 ───▶ COMPLETE ──finish──▶ MatchResult
//! ```
//!
//! Every rejected call returns an error and leaves the match untouched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::state::{MatchState, Phase, TOTAL_TURNS};
use crate::cards::{Card, CardPool};
use crate::core::{Side, SideMap};
use crate::error::NineError;
use crate::records::{HighScoreTracker, ScoreStore};
use crate::rules::{resolve, RoundOutcome, Winner};
use crate::strategy::{Decision, OpponentPolicy};

/// One scored turn, for animation and replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResolved {
    pub turn_number: u8,
    pub first_mover: Side,
    pub player_card: Card,
    pub opponent_card: Card,
    pub outcome: RoundOutcome,
    /// Running totals after this turn.
    pub player_score: u32,
    pub opponent_score: u32,
}

/// Final result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Overall winner; `Tie` is a drawn match.
    pub outcome: Winner,
    pub player_score: u32,
    pub opponent_score: u32,
    /// Decided before the record is written, so a failed write does not change it.
    pub is_new_high_score: bool,
}

/// A single nine-turn match.
///
/// Owns both card pools and the match state exclusively. The opponent
/// policy and the high score tracker are passed in per call, so the
/// match itself holds no collaborators and can be cloned or serialized
/// as a checkpoint at any point. A restored checkpoint must agree with
/// itself: pools, history and result all have to fit the turn.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "MatchParts")]
pub struct NineMatch {
    state: MatchState,
    pools: SideMap<CardPool>,
    history: SmallVec<[TurnResolved; 9]>,
    result: Option<MatchResult>,
}

/// Serialized shape of a match, before the parts are checked against each other.
#[derive(Deserialize)]
struct MatchParts {
    state: MatchState,
    pools: SideMap<CardPool>,
    history: SmallVec<[TurnResolved; 9]>,
    result: Option<MatchResult>,
}

impl TryFrom<MatchParts> for NineMatch {
    type Error = String;

    fn try_from(parts: MatchParts) -> Result<Self, Self::Error> {
        let MatchParts {
            state,
            pools,
            history,
            result,
        } = parts;

        let finished = usize::from(state.turn_number - 1);
        let played = match state.phase {
            Phase::Revealed => finished + 1,
            Phase::Selecting | Phase::Complete => finished,
        };
        for side in Side::ALL {
            let used = pools[side].used().count();
            if used != played {
                return Err(format!("{side} has played {used} cards, expected {played}"));
            }
            let pending = state.pending[side];
            let pending_ok = match state.phase {
                Phase::Revealed => pending.is_some_and(|c| pools[side].is_used(c.value())),
                _ => pending.map_or(true, |c| pools[side].contains(c.value())),
            };
            if !pending_ok {
                return Err(format!("{side} pending card does not match its pool"));
            }
        }

        if history.len() != finished {
            return Err(format!("{} turns in history, expected {finished}", history.len()));
        }
        if result.is_some() && !state.is_complete() {
            return Err("result recorded before the match is complete".to_string());
        }

        Ok(Self {
            state,
            pools,
            history,
            result,
        })
    }
}

impl NineMatch {
    /// Fresh match: turn 1, both pools full.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn pool(&self, side: Side) -> &CardPool {
        &self.pools[side]
    }

    /// Turns resolved so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnResolved] {
        &self.history
    }

    /// Result, once `finish` has run.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.result
    }

    /// Can the player select or confirm right now?
    ///
    /// False outside `Selecting` and while the opponent is deliberating.
    #[must_use]
    pub fn can_accept(&self) -> bool {
        self.state.phase == Phase::Selecting && !self.state.awaiting_opponent
    }

    /// Overall winner, once all turns are played.
    #[must_use]
    pub fn winner(&self) -> Option<Winner> {
        self.state
            .is_complete()
            .then(|| Winner::compare(self.state.player_score(), self.state.opponent_score()))
    }

    fn expect_input(&self, action: &'static str) -> Result<(), NineError> {
        if self.can_accept() {
            Ok(())
        } else {
            Err(NineError::InvalidPhase {
                action,
                phase: self.state.phase,
            })
        }
    }

    /// Choose (or re-choose) the player's card for this turn.
    ///
    /// Nothing is committed until `confirm`.
    pub fn select(&mut self, value: u8) -> Result<Card, NineError> {
        self.expect_input("select")?;
        let card = Card::new(value)
            .filter(|card| self.pools[Side::Player].contains(card.value()))
            .ok_or(NineError::InvalidCard(value))?;

        self.state.pending[Side::Player] = Some(card);
        debug!(turn = self.state.turn_number, card = value, "card selected");
        Ok(card)
    }

    /// Lock in the selected card and hand the turn to the opponent.
    ///
    /// Input is refused from here until `reveal` or `withdraw`.
    pub fn confirm(&mut self) -> Result<Card, NineError> {
        self.expect_input("confirm")?;
        let card = self.state.pending[Side::Player].ok_or(NineError::NothingSelected)?;

        self.state.awaiting_opponent = true;
        debug!(turn = self.state.turn_number, card = card.value(), "selection confirmed");
        Ok(card)
    }

    /// Back out of a confirmation before the opponent reveals.
    ///
    /// The pending selection is kept. Returns whether anything changed.
    pub fn withdraw(&mut self) -> bool {
        if !self.state.awaiting_opponent {
            return false;
        }
        self.state.awaiting_opponent = false;
        debug!(turn = self.state.turn_number, "confirmation withdrawn");
        true
    }

    /// Let the opponent pick, then flip both cards face up.
    ///
    /// Both cards move to their pools' used sets here.
    pub fn reveal<O>(&mut self, opponent: &mut O) -> Result<Decision, NineError>
    where
        O: OpponentPolicy + ?Sized,
    {
        if self.state.phase != Phase::Selecting || !self.state.awaiting_opponent {
            return Err(NineError::InvalidPhase {
                action: "reveal",
                phase: self.state.phase,
            });
        }
        let player_card = self.state.pending[Side::Player].ok_or(NineError::NothingSelected)?;

        let decision = opponent
            .decide(
                &self.pools[Side::Opponent],
                self.state.score_diff(),
                self.state.turn_number,
            )
            .ok_or(NineError::PoolExhausted(Side::Opponent))?;
        if !self.pools[Side::Opponent].contains(decision.card.value()) {
            return Err(NineError::IllegalOpponentCard(decision.card.value()));
        }

        self.pools[Side::Player].take(player_card.value())?;
        self.pools[Side::Opponent].take(decision.card.value())?;
        self.state.pending[Side::Opponent] = Some(decision.card);
        self.state.awaiting_opponent = false;
        self.state.phase = Phase::Revealed;

        debug!(
            turn = self.state.turn_number,
            player_card = player_card.value(),
            opponent_card = decision.card.value(),
            rule = ?decision.rule,
            "cards revealed"
        );
        Ok(decision)
    }

    /// Score the revealed round and move on.
    pub fn resolve_turn(&mut self) -> Result<TurnResolved, NineError> {
        let phase_error = NineError::InvalidPhase {
            action: "resolve",
            phase: self.state.phase,
        };
        if self.state.phase != Phase::Revealed {
            return Err(phase_error);
        }
        let (Some(player_card), Some(opponent_card)) = (
            self.state.pending[Side::Player],
            self.state.pending[Side::Opponent],
        ) else {
            return Err(phase_error);
        };

        let outcome = resolve(player_card, opponent_card);
        if let Some(side) = outcome.winner.side() {
            self.state.scores[side] += outcome.points_awarded;
        }

        let event = TurnResolved {
            turn_number: self.state.turn_number,
            first_mover: self.state.first_mover(),
            player_card,
            opponent_card,
            outcome,
            player_score: self.state.player_score(),
            opponent_score: self.state.opponent_score(),
        };
        self.history.push(event);

        debug!(
            turn = event.turn_number,
            winner = %outcome.winner,
            points = outcome.points_awarded,
            player_score = event.player_score,
            opponent_score = event.opponent_score,
            "turn resolved"
        );

        self.state.pending = SideMap::with_value(None);
        self.state.turn_number += 1;
        if event.turn_number >= TOTAL_TURNS {
            self.state.phase = Phase::Complete;
            info!(
                player_score = event.player_score,
                opponent_score = event.opponent_score,
                "match complete"
            );
        } else {
            self.state.phase = Phase::Selecting;
        }

        Ok(event)
    }

    /// Select, confirm, reveal and resolve in one step, with no delay.
    ///
    /// A rejected card leaves the match unchanged.
    pub fn play_turn<O>(&mut self, value: u8, opponent: &mut O) -> Result<TurnResolved, NineError>
    where
        O: OpponentPolicy + ?Sized,
    {
        self.select(value)?;
        self.confirm()?;
        if let Err(err) = self.reveal(opponent) {
            self.withdraw();
            return Err(err);
        }
        self.resolve_turn()
    }

    /// Close out a completed match and submit the player's score.
    ///
    /// The score is submitted once; later calls return the same result.
    pub fn finish<S: ScoreStore>(
        &mut self,
        tracker: &mut HighScoreTracker<S>,
    ) -> Result<MatchResult, NineError> {
        if let Some(result) = self.result {
            return Ok(result);
        }
        let Some(outcome) = self.winner() else {
            return Err(NineError::InvalidPhase {
                action: "finish",
                phase: self.state.phase,
            });
        };

        let player_score = self.state.player_score();
        let result = MatchResult {
            outcome,
            player_score,
            opponent_score: self.state.opponent_score(),
            is_new_high_score: tracker.submit(player_score),
        };
        info!(
            outcome = %result.outcome,
            player_score = result.player_score,
            opponent_score = result.opponent_score,
            new_high_score = result.is_new_high_score,
            "match finished"
        );

        self.result = Some(result);
        Ok(result)
    }
}
