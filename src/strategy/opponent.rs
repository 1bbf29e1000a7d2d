//! Threshold-driven opponent.
//!
//! Rules are evaluated top to bottom and the first one that applies
//! picks the card:
//!
//! 1. **Desperation**: behind by more than 15 with more than 3 cards
//!    left, play one of the 3 highest at random.
//! 2. **Preservation**: ahead by more than 15 with more than 3 cards
//!    left, play one of the 3 lowest at random.
//! 3. **Endgame push**: 3 or fewer turns left and not ahead, play the
//!    highest card.
//! 4. **Balanced**: with probability 0.6, play a random card from 4..=6
//!    if any remain.
//! 5. **Fallback**: play any available card at random.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardList, CardPool, MAX_CARD};
use crate::core::{GameRng, RandomSource};

/// Score lead (either way) beyond which the opponent stops playing balanced.
pub const LEAD_THRESHOLD: i32 = 15;

/// Cards considered by the desperation/preservation rules, and the pool
/// size those rules require to be exceeded.
pub const SPREAD: usize = 3;

/// Turns remaining (counting the current one) at which the endgame starts.
pub const ENDGAME_TURNS: i32 = 3;

/// The "middle" card values the balanced rule prefers.
pub const MIDDLE_BAND: RangeInclusive<u8> = 4..=6;

/// Chance the balanced rule fires when middle cards remain.
pub const MIDDLE_PROBABILITY: f64 = 0.6;

/// Which rule produced a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Desperation,
    Preservation,
    EndgamePush,
    Balanced,
    Fallback,
    Scripted,
}

/// A chosen card and the reason for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub card: Card,
    pub rule: Rule,
}

impl Decision {
    #[must_use]
    pub const fn new(card: Card, rule: Rule) -> Self {
        Self { card, rule }
    }
}

/// Picks the opponent's card for a turn.
pub trait OpponentPolicy {
    /// Decide on a card from `pool`.
    ///
    /// `score_diff` is opponent score minus player score; `turn_number`
    /// runs 1..=9. The returned card must be available in `pool`.
    /// Returns `None` only for an empty pool.
    fn decide(&mut self, pool: &CardPool, score_diff: i32, turn_number: u8) -> Option<Decision>;

    /// Just the card.
    fn choose_card(&mut self, pool: &CardPool, score_diff: i32, turn_number: u8) -> Option<Card> {
        self.decide(pool, score_diff, turn_number).map(|d| d.card)
    }
}

impl<P: OpponentPolicy + ?Sized> OpponentPolicy for Box<P> {
    fn decide(&mut self, pool: &CardPool, score_diff: i32, turn_number: u8) -> Option<Decision> {
        (**self).decide(pool, score_diff, turn_number)
    }
}

/// The shipped opponent personality.
#[derive(Clone, Debug)]
pub struct ThresholdOpponent<R = GameRng> {
    rng: R,
}

impl ThresholdOpponent<GameRng> {
    /// Opponent with a seeded ChaCha RNG.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl<R: RandomSource> ThresholdOpponent<R> {
    /// Opponent drawing from the given random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// The random source.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    fn pick(&mut self, cards: &[Card], rule: Rule) -> Option<Decision> {
        self.rng.choose(cards).map(|&card| Decision::new(card, rule))
    }
}

impl<R: RandomSource> OpponentPolicy for ThresholdOpponent<R> {
    fn decide(&mut self, pool: &CardPool, score_diff: i32, turn_number: u8) -> Option<Decision> {
        let remaining = pool.len();

        if score_diff < -LEAD_THRESHOLD && remaining > SPREAD {
            let top = pool.top_n(SPREAD);
            return self.pick(&top, Rule::Desperation);
        }

        if score_diff > LEAD_THRESHOLD && remaining > SPREAD {
            let bottom = pool.bottom_n(SPREAD);
            return self.pick(&bottom, Rule::Preservation);
        }

        let turns_left = i32::from(MAX_CARD) + 1 - i32::from(turn_number);
        if turns_left <= ENDGAME_TURNS && score_diff <= 0 {
            if let Some(highest) = pool.highest() {
                return Some(Decision::new(highest, Rule::EndgamePush));
            }
        }

        let middle: CardList = pool
            .available()
            .filter(|c| MIDDLE_BAND.contains(&c.value()))
            .collect();
        if !middle.is_empty() && self.rng.gen_bool(MIDDLE_PROBABILITY) {
            return self.pick(&middle, Rule::Balanced);
        }

        let all: CardList = pool.available().collect();
        self.pick(&all, Rule::Fallback)
    }
}
