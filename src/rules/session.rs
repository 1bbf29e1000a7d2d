//! Game session capability.
//!
//! Every mini-game exposes the same lifecycle to the application:
//! - `init`: Discard any previous state and set up a fresh game
//! - `start`: Open the game for input
//! - `resolve_turn`: Apply one move and report what happened
//! - `end`: Produce the final outcome once the game is over
//!
//! Sessions receive their collaborators (persistence, randomness) at
//! construction instead of reaching for globals.

/// Lifecycle shared by all game sessions.
pub trait GameSession {
    /// A single player input.
    type Move;

    /// What one resolved move produced.
    type Event;

    /// Final result of a finished game.
    type Outcome;

    /// Rejection of a move or lifecycle call.
    type Error;

    /// Reset to a fresh game. Any game in progress is abandoned.
    fn init(&mut self);

    /// Open the game for input.
    fn start(&mut self);

    /// Apply one move.
    ///
    /// A rejected move leaves the session unchanged.
    fn resolve_turn(&mut self, mv: Self::Move) -> Result<Self::Event, Self::Error>;

    /// Conclude a finished game.
    fn end(&mut self) -> Result<Self::Outcome, Self::Error>;

    /// Has the game reached its terminal state?
    fn is_over(&self) -> bool;
}
