//! CLI command definitions and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::handoff::{CoverSpool, TagWriter, TagWriterMessage};
use crate::resolve::{self, CoverSize, ResolveError, ResolverConfig, ResolverService};
use crate::{config, handoff};

/// SongID CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Identify a track using audio fingerprinting
    Identify {
        /// Path to the audio file
        path: PathBuf,
        /// AcoustID API key (or set ACOUSTID_API_KEY env var)
        #[arg(short, long, env = "ACOUSTID_API_KEY")]
        api_key: Option<String>,
        /// Skip the cover art search
        #[arg(long)]
        no_cover: bool,
        /// Hand the resolved metadata to the configured tag writer
        #[arg(long)]
        write: bool,
    },
    /// Check if fingerprinting tools are installed
    CheckTools,
    /// Store the AcoustID API key in the config file
    SetKey {
        /// The API key to store
        key: String,
    },
}

/// Dispatch the parsed command line.
pub fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Identify {
            path,
            api_key,
            no_cover,
            write,
        } => {
            let rt = Runtime::new()?;
            cmd_identify(&rt, path, api_key.as_deref(), *no_cover, *write)
        }
        Commands::CheckTools => cmd_check_tools(),
        Commands::SetKey { key } => cmd_set_key(key),
    }
}

/// Identify a track and print the resolved metadata
fn cmd_identify(
    rt: &Runtime,
    path: &Path,
    api_key: Option<&str>,
    no_cover: bool,
    write: bool,
) -> Result<()> {
    let app_config = config::load();

    // Check for API key
    let api_key = match api_key
        .map(String::from)
        .or_else(|| app_config.credentials.acoustid_api_key.clone())
    {
        Some(key) => key,
        None => {
            eprintln!("Error: AcoustID API key required.");
            eprintln!("Get one at: https://acoustid.org/new-application");
            eprintln!("Then use: --api-key YOUR_KEY, set ACOUSTID_API_KEY, or run: songid set-key YOUR_KEY");
            std::process::exit(1);
        }
    };

    // Check if fpcalc is available
    if !resolve::fingerprint::is_fpcalc_available() {
        print_fpcalc_install_instructions();
        std::process::exit(1);
    }

    // Input precondition: the file must be readable before any resolution work
    if std::fs::File::open(path).is_err() {
        return Err(Error::not_found(path));
    }

    println!("Identifying: {:?}", path);
    println!();

    let service = ResolverService::new(ResolverConfig {
        acoustid_api_key: api_key,
        cover_size: CoverSize::parse(&app_config.resolver.cover_size),
        skip_cover: no_cover,
    });

    let resolution = match rt.block_on(service.resolve_file(path)) {
        Ok(resolution) => resolution,
        Err(ResolveError::NoUsableMatch) => {
            println!("✗ No matches found for this track.");
            println!("  The audio may not be in the AcoustID database.");
            return Ok(());
        }
        Err(e) => {
            eprintln!("✗ No metadata found: {}", e);
            std::process::exit(1);
        }
    };

    let meta = &resolution.metadata;
    if meta.is_empty() {
        println!("✓ Match found, but the match carried no usable fields.");
    } else {
        println!("✓ Match found!");
        println!();
        print_field("Title", &meta.title);
        print_field("Artist", &meta.artist);
        print_field("Album", &meta.album);
        print_field("Album artist", &meta.album_artist);
        print_field("Year", &meta.year);
        print_field("Country", &meta.country);
        if !meta.track_number.is_empty() {
            if meta.track_total.is_empty() {
                println!("  Track:        {}", meta.track_number);
            } else {
                println!("  Track:        {}/{}", meta.track_number, meta.track_total);
            }
        }
    }

    // Spool the cover for display/hand-off
    let cover_path = match resolution.cover {
        Some(ref art) => match CoverSpool::for_current_user() {
            Some(spool) => match spool.store(art) {
                Ok(stored) => {
                    println!();
                    println!("  Cover:        {:?} ({} bytes)", stored, art.data.len());
                    Some(stored)
                }
                Err(e) => {
                    tracing::warn!("Couldn't spool cover image: {}", e);
                    None
                }
            },
            None => None,
        },
        None => {
            println!();
            println!("  (no cover art available)");
            None
        }
    };

    // Hand off to the tag writer when asked and when the collaborator exists
    if write {
        match TagWriter::detect(app_config.tag_writer.command.as_deref()) {
            Some(writer) => {
                let message = TagWriterMessage::new(meta, cover_path);
                writer.send(&message)?;
                println!();
                println!("✓ Sent {} fields to the tag writer", handoff::MESSAGE_KEYS.len());
            }
            None => {
                println!();
                println!("  Tag writer not available - set tag_writer.command in the config to enable write-back.");
            }
        }
    }

    Ok(())
}

/// Check if fingerprinting tools are installed
fn cmd_check_tools() -> Result<()> {
    println!("Checking resolution tools...\n");

    // Check fpcalc
    if let Some(version) = resolve::fingerprint::get_fpcalc_version() {
        println!("✓ fpcalc: {}", version);
    } else {
        println!("✗ fpcalc: NOT FOUND");
        print_fpcalc_install_instructions();
    }

    println!();
    println!("API Keys:");
    let app_config = config::load();
    if std::env::var("ACOUSTID_API_KEY").is_ok() {
        println!("✓ ACOUSTID_API_KEY: set");
    } else if app_config.credentials.acoustid_api_key.is_some() {
        println!("✓ acoustid_api_key: set in config");
    } else {
        println!("✗ ACOUSTID_API_KEY: not set");
        println!("  Get one at: https://acoustid.org/new-application");
    }

    println!();
    println!("Tag writer:");
    match TagWriter::detect(app_config.tag_writer.command.as_deref()) {
        Some(_) => println!("✓ tag_writer.command: present"),
        None => println!("✗ tag_writer.command: not configured or missing (write-back disabled)"),
    }

    Ok(())
}

/// Store the API key in the config file
fn cmd_set_key(key: &str) -> Result<()> {
    let mut app_config = config::load();
    app_config.credentials.acoustid_api_key = Some(key.to_string());
    config::save(&app_config)?;
    println!("✓ API key saved");
    Ok(())
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        println!("  {:<13} {}", format!("{label}:"), value);
    }
}

fn print_fpcalc_install_instructions() {
    eprintln!("fpcalc (Chromaprint) is required for fingerprinting.");
    eprintln!("Install it:");
    eprintln!("  Windows: winget install AcoustID.Chromaprint");
    eprintln!("  macOS:   brew install chromaprint");
    eprintln!("  Linux:   apt install libchromaprint-tools");
}
