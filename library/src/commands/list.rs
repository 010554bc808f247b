//! List command - print the whole catalog

use anyhow::Result;
use clap::Args;

use crate::context::LibraryContext;
use crate::output::{ListedEntry, print_entries};

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Ignore the cache and scan the search location again
    #[arg(long)]
    pub rescan: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Execute the list command
pub fn execute(ctx: &LibraryContext, args: ListArgs) -> Result<()> {
    let search_dir = ctx.search_dir(None)?;
    let (catalog, outcome) = ctx.open_catalog(&search_dir, !args.rescan);
    tracing::debug!("Catalog ready: {:?}", outcome);

    let entries: Vec<ListedEntry<'_>> = catalog.iter().map(ListedEntry::from).collect();
    print_entries(&entries, args.json)
}
