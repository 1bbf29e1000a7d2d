//! Round resolution.
//!
//! The higher card takes both cards' face value in points. Equal cards
//! cancel out: nobody scores.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Side;

/// Winner of a round or a whole match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Opponent,
    Tie,
}

impl Winner {
    /// The winning side, if there is one.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Winner::Player => Some(Side::Player),
            Winner::Opponent => Some(Side::Opponent),
            Winner::Tie => None,
        }
    }

    /// Compare two totals (or two cards) from the player's point of view.
    #[must_use]
    pub fn compare<T: Ord>(player: T, opponent: T) -> Self {
        match player.cmp(&opponent) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Opponent,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Winner::Player,
            Side::Opponent => Winner::Opponent,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Player => write!(f, "player"),
            Winner::Opponent => write!(f, "opponent"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// Result of one revealed pair of cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winner: Winner,
    /// Sum of both cards for a decisive round, 0 for a tie.
    pub points_awarded: u32,
}

/// Resolve one round.
///
/// ```
/// use nine_game::cards::Card;
/// use nine_game::rules::{resolve, Winner};
///
/// let nine = Card::new(9).unwrap();
/// let one = Card::new(1).unwrap();
///
/// let outcome = resolve(nine, one);
/// assert_eq!(outcome.winner, Winner::Player);
/// assert_eq!(outcome.points_awarded, 10);
/// ```
#[must_use]
pub fn resolve(player_card: Card, opponent_card: Card) -> RoundOutcome {
    let winner = Winner::compare(player_card, opponent_card);
    let points_awarded = match winner {
        Winner::Tie => 0,
        _ => u32::from(player_card.value()) + u32::from(opponent_card.value()),
    };
    RoundOutcome {
        winner,
        points_awarded,
    }
}
