//! Cards and per-side card pools.
//!
//! ## Key Types
//!
//! - `Card`: A validated card value, 1 through 9
//! - `CardPool`: One side's available/used partition of the nine cards

pub mod card;
pub mod pool;

pub use card::{Card, MAX_CARD, MIN_CARD};
pub use pool::{CardList, CardPool};
