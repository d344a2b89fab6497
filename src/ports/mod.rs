//! Ports (trait boundaries) between the match pipeline and its collaborators.
//!
//! The pipeline drives matches through these traits; concrete opponents and
//! observers live in [`crate::pipeline`] and in caller code.

pub mod observer;
pub mod opponent;

pub use observer::MatchObserver;
pub use opponent::Opponent;
