//! Statistics over engine behaviour
//!
//! Used to check that a difficulty level bypasses the search as often as it
//! claims to.

pub mod stats;

pub use stats::{BypassCalibration, ProportionEstimate, wilson_interval};
