//! Rules shared by the match machinery.
//!
//! - `resolver`: Pure round resolution (higher card takes the points)
//! - `session`: The `GameSession` lifecycle every game implements

pub mod resolver;
pub mod session;

pub use resolver::{resolve, RoundOutcome, Winner};
pub use session::GameSession;
