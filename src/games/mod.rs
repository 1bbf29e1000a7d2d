//! Game implementations.
//!
//! - `nine`: Card-dueling "Nine" against the CPU opponent

pub mod nine;
