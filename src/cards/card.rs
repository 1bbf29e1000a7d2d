//! Card values.

use serde::{Deserialize, Serialize};

/// Lowest card value.
pub const MIN_CARD: u8 = 1;

/// Highest card value; also the number of cards per side and turns per match.
pub const MAX_CARD: u8 = 9;

/// A card in a Nine hand, valued 1 through 9.
///
/// Construction validates the range, so any `Card` in circulation is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Create a card, or `None` if `value` is outside 1..=9.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= MIN_CARD && value <= MAX_CARD {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All nine cards in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Card> {
        (MIN_CARD..=MAX_CARD).map(Card)
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::new(value).ok_or_else(|| format!("card value {value} outside {MIN_CARD}..={MAX_CARD}"))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
