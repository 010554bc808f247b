//! Scan command - rebuild the catalog from the search location

use anyhow::Result;
use clap::Args;
use romshelf_core::library::RefreshOutcome;
use std::path::PathBuf;

use crate::context::LibraryContext;

/// Arguments for the scan command
#[derive(Args)]
pub struct ScanArgs {
    /// Directory to scan (defaults to `library.search_location`, then the
    /// current directory)
    pub dir: Option<PathBuf>,
}

/// Execute the scan command
pub fn execute(ctx: &LibraryContext, args: ScanArgs) -> Result<()> {
    let search_dir = ctx.search_dir(args.dir.as_deref())?;
    let (_, outcome) = ctx.open_catalog(&search_dir, false);

    let roms = match outcome {
        RefreshOutcome::Scanned { roms } => roms,
        RefreshOutcome::Loaded => 0,
    };
    println!("Found {} ROM(s) in {}", roms, search_dir.display());
    println!("Catalog cache: {}", ctx.cache_path.display());
    Ok(())
}
