//! High score persistence.
//!
//! The match core never touches storage directly. It talks to a
//! `ScoreStore` injected at the application edge, through a
//! `HighScoreTracker` that keeps the authoritative in-memory record.
//!
//! ## Key Types
//!
//! - `ScoreStore`: Key/value persistence capability
//! - `MemoryStore`: String-valued in-memory store (local-storage shaped)
//! - `FileStore`: JSON file on disk
//! - `HighScoreTracker`: "Higher is better" record keeping on top of a store

pub mod store;
pub mod tracker;

pub use store::{FileStore, MemoryStore, ScoreStore};
pub use tracker::HighScoreTracker;
