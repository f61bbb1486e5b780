//! # autocrate_cli
//!
//! Library half of the `autocrate` binary: config resolution, input flag
//! handling, and the command implementations. `main.rs` only parses
//! arguments, installs logging, and dispatches.

pub mod commands;
pub mod config;
pub mod resolve;
