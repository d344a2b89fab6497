//! Subcommands of the `bemora` binary

pub mod analyze;
pub mod maze;
pub mod play;
pub mod simulate;
