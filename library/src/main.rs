//! romshelf - browse and search a homebrew ROM library
//!
//! # Commands
//!
//! - `romshelf scan [DIR]` - Rescan the search location and rewrite the cache
//! - `romshelf list` - Print the catalog (from cache when possible)
//! - `romshelf search <QUERY>` - Fuzzy-search titles and authors
//! - `romshelf info <ROM>` - Show the metadata and layout of one ROM
//! - `romshelf config` - Show or change settings
//!
//! # Usage
//!
//! ```bash
//! # Remember where the ROMs live, then build the catalog
//! romshelf config --search-location /mnt/sd/switch
//! romshelf scan
//!
//! # Search, as JSON for scripts
//! romshelf search "mario kart" --json
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`) and goes to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use romshelf_library::commands::{config, info, list, scan, search};
use romshelf_library::context::LibraryContext;
use std::path::PathBuf;

/// romshelf - browse and search a homebrew ROM library
#[derive(Parser)]
#[command(name = "romshelf")]
#[command(about = "Browse and search a homebrew ROM library")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Catalog cache file to use instead of the one in the data directory
    #[arg(long, global = true, value_name = "PATH")]
    cache_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rescan the search location and rewrite the catalog cache
    Scan(scan::ScanArgs),

    /// Print the catalog
    List(list::ListArgs),

    /// Fuzzy-search the catalog
    Search(search::SearchArgs),

    /// Show what the reader finds inside one ROM
    Info(info::InfoArgs),

    /// Show or change settings
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = LibraryContext::load(cli.config_file, cli.cache_file)?;

    match cli.command {
        Commands::Scan(args) => scan::execute(&ctx, args),
        Commands::List(args) => list::execute(&ctx, args),
        Commands::Search(args) => search::execute(&ctx, args),
        Commands::Info(args) => info::execute(&ctx, args),
        Commands::Config(args) => config::execute(&ctx, args),
    }
}
