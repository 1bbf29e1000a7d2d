//! Per-side card pool.
//!
//! Each side starts a match holding one of every card 1..=9. Playing a
//! card moves it from `available` to `used` exactly once; it never comes
//! back. `available` and `used` always partition the full set.
//!
//! Both sets are `im::OrdSet`, so cloning a pool for a match snapshot is
//! O(1) and iteration is in ascending value order. Deserializing checks
//! the partition, so a restored pool is as sound as a played one.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use crate::error::NineError;

/// Small card list returned by the top/bottom queries.
pub type CardList = SmallVec<[Card; 9]>;

/// One side's cards, partitioned into still-playable and already-played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PoolSets")]
pub struct CardPool {
    available: OrdSet<Card>,
    used: OrdSet<Card>,
}

/// Serialized shape of a pool, before the partition is checked.
#[derive(Deserialize)]
struct PoolSets {
    available: OrdSet<Card>,
    used: OrdSet<Card>,
}

impl TryFrom<PoolSets> for CardPool {
    type Error = String;

    fn try_from(sets: PoolSets) -> Result<Self, Self::Error> {
        if let Some(card) = sets.available.iter().find(|c| sets.used.contains(c)) {
            return Err(format!("card {card} is both available and used"));
        }
        if let Some(card) = Card::all().find(|c| !sets.available.contains(c) && !sets.used.contains(c)) {
            return Err(format!("card {card} is neither available nor used"));
        }
        Ok(Self {
            available: sets.available,
            used: sets.used,
        })
    }
}

impl Default for CardPool {
    fn default() -> Self {
        Self::new()
    }
}

impl CardPool {
    /// Fresh pool with all nine cards available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: Card::all().collect(),
            used: OrdSet::new(),
        }
    }

    /// Pool with only `cards` available; every other card counts as used.
    ///
    /// Duplicates collapse. Useful for setting up mid-match positions.
    #[must_use]
    pub fn with_available(cards: impl IntoIterator<Item = Card>) -> Self {
        let available: OrdSet<Card> = cards.into_iter().collect();
        let used = Card::all().filter(|c| !available.contains(c)).collect();
        Self { available, used }
    }

    /// Move `value` from available to used.
    ///
    /// Fails with `InvalidCard` if the value is out of range or already
    /// played. The pool is untouched on failure.
    pub fn take(&mut self, value: u8) -> Result<Card, NineError> {
        let card = Card::new(value).ok_or(NineError::InvalidCard(value))?;
        if self.available.remove(&card).is_none() {
            return Err(NineError::InvalidCard(value));
        }
        self.used.insert(card);
        Ok(card)
    }

    /// Is `value` still playable?
    #[must_use]
    pub fn contains(&self, value: u8) -> bool {
        Card::new(value).is_some_and(|c| self.available.contains(&c))
    }

    /// Has `value` already been played?
    #[must_use]
    pub fn is_used(&self, value: u8) -> bool {
        Card::new(value).is_some_and(|c| self.used.contains(&c))
    }

    /// Number of playable cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// True once every card has been played.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Playable cards in ascending order.
    pub fn available(&self) -> impl Iterator<Item = Card> + '_ {
        self.available.iter().copied()
    }

    /// Played cards in ascending order.
    pub fn used(&self) -> impl Iterator<Item = Card> + '_ {
        self.used.iter().copied()
    }

    /// The `n` highest playable cards, highest first.
    ///
    /// Returns everything available if fewer than `n` remain.
    #[must_use]
    pub fn top_n(&self, n: usize) -> CardList {
        let ascending: CardList = self.available().collect();
        ascending.into_iter().rev().take(n).collect()
    }

    /// The `n` lowest playable cards, lowest first.
    ///
    /// Returns everything available if fewer than `n` remain.
    #[must_use]
    pub fn bottom_n(&self, n: usize) -> CardList {
        self.available().take(n).collect()
    }

    /// Highest playable card.
    #[must_use]
    pub fn highest(&self) -> Option<Card> {
        self.available.get_max().copied()
    }

    /// Lowest playable card.
    #[must_use]
    pub fn lowest(&self) -> Option<Card> {
        self.available.get_min().copied()
    }
}
