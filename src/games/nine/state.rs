//! Match state.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, MAX_CARD};
use crate::core::{Side, SideMap};

/// Turns in a match: one per card.
pub const TOTAL_TURNS: u8 = MAX_CARD;

/// Where a match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player's card (and, once confirmed, the opponent's).
    Selecting,
    /// Both cards are face up; the round has not been scored yet.
    Revealed,
    /// All nine turns are done.
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Selecting => write!(f, "selecting"),
            Phase::Revealed => write!(f, "revealed"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// Observable state of one match.
///
/// Scores only change when a revealed round is resolved. `phase` is
/// `Complete` exactly when `turn_number` has passed 9. Deserializing
/// rejects any state that breaks these rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateFields")]
pub struct MatchState {
    pub(super) turn_number: u8,
    pub(super) phase: Phase,
    pub(super) scores: SideMap<u32>,
    pub(super) pending: SideMap<Option<Card>>,
    /// Player has confirmed; the opponent has not revealed yet.
    pub(super) awaiting_opponent: bool,
}

/// Serialized shape of a match state, before it is checked.
#[derive(Deserialize)]
struct StateFields {
    turn_number: u8,
    phase: Phase,
    scores: SideMap<u32>,
    pending: SideMap<Option<Card>>,
    awaiting_opponent: bool,
}

impl TryFrom<StateFields> for MatchState {
    type Error = String;

    fn try_from(fields: StateFields) -> Result<Self, Self::Error> {
        let StateFields {
            turn_number,
            phase,
            scores,
            pending,
            awaiting_opponent,
        } = fields;

        if !(1..=TOTAL_TURNS + 1).contains(&turn_number) {
            return Err(format!("turn {turn_number} outside 1..={}", TOTAL_TURNS + 1));
        }
        if (phase == Phase::Complete) != (turn_number > TOTAL_TURNS) {
            return Err(format!("phase {phase} does not match turn {turn_number}"));
        }

        let (player, opponent) = (pending[Side::Player], pending[Side::Opponent]);
        let pending_ok = match phase {
            Phase::Selecting => opponent.is_none() && (!awaiting_opponent || player.is_some()),
            Phase::Revealed => player.is_some() && opponent.is_some() && !awaiting_opponent,
            Phase::Complete => player.is_none() && opponent.is_none() && !awaiting_opponent,
        };
        if !pending_ok {
            return Err(format!("pending cards do not fit the {phase} phase"));
        }

        Ok(Self {
            turn_number,
            phase,
            scores,
            pending,
            awaiting_opponent,
        })
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Turn 1, selecting, nothing scored.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            phase: Phase::Selecting,
            scores: SideMap::with_value(0),
            pending: SideMap::with_value(None),
            awaiting_opponent: false,
        }
    }

    /// Current turn, 1..=9 while playing and 10 once complete.
    #[must_use]
    pub fn turn_number(&self) -> u8 {
        self.turn_number
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Who leads this turn. Display only: cards are revealed together.
    #[must_use]
    pub fn first_mover(&self) -> Side {
        Side::first_mover(self.turn_number)
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side]
    }

    #[must_use]
    pub fn player_score(&self) -> u32 {
        self.scores[Side::Player]
    }

    #[must_use]
    pub fn opponent_score(&self) -> u32 {
        self.scores[Side::Opponent]
    }

    /// Opponent score minus player score.
    #[must_use]
    pub fn score_diff(&self) -> i32 {
        let opponent = i64::from(self.opponent_score());
        let player = i64::from(self.player_score());
        i32::try_from(opponent - player).unwrap_or(if opponent > player { i32::MAX } else { i32::MIN })
    }

    #[must_use]
    pub fn pending_player_card(&self) -> Option<Card> {
        self.pending[Side::Player]
    }

    #[must_use]
    pub fn pending_opponent_card(&self) -> Option<Card> {
        self.pending[Side::Opponent]
    }

    /// Between confirmation and the opponent's reveal.
    #[must_use]
    pub fn is_awaiting_opponent(&self) -> bool {
        self.awaiting_opponent
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }
}
