//! "Nine": a nine-turn card duel against the CPU.
//!
//! Each side holds the cards 1 through 9. Every turn both sides commit
//! one card face down, then reveal together; the higher card scores the
//! sum of both, equal cards score nothing. After nine turns the higher
//! total wins and the player's total is offered as a new high score.
//!
//! ## Layers
//!
//! - `MatchState`: Turn, phase, scores and pending cards
//! - `NineMatch`: The synchronous state machine
//!   (`select` → `confirm` → `reveal` → `resolve_turn` → `finish`)
//! - `NineSession`: Composes a match with an opponent, a high score
//!   tracker and a config; runs the opponent's thinking delay as a
//!   cancellable async suspension point

mod machine;
mod session;
mod state;

pub use machine::{MatchResult, NineMatch, TurnResolved};
pub use session::NineSession;
pub use state::{MatchState, Phase, TOTAL_TURNS};
