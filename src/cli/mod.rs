//! CLI infrastructure for the `bemora` binary
//!
//! Commands for playing against the engine, simulating matches, generating
//! mazes and inspecting search results.

pub mod commands;
pub mod config;
pub mod output;
