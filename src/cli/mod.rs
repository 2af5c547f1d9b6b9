//! Command-line interface for songid.
//!
//! This module provides CLI commands for identifying a track, checking the
//! required external tooling, and storing the API key.

mod commands;

pub use commands::{Cli, Commands, run_command};
