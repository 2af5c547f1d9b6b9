//! SongID - identifies audio files by acoustic fingerprint.
//!
//! Fingerprints a file with Chromaprint, looks the fingerprint up on
//! AcoustID, resolves canonical metadata from the match tree, fetches a
//! front cover from the Cover Art Archive, and can hand the result to an
//! external tag-writing application.

pub mod cli;
pub mod config;
pub mod error;
pub mod handoff;
pub mod resolve;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("songid=info".parse().unwrap()))
        .init();

    cli::run_command(&args)?;
    Ok(())
}
