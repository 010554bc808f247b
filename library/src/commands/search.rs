//! Search command - fuzzy-filter the catalog

use anyhow::Result;
use clap::Args;
use romshelf_core::library::RomCatalog;

use crate::context::LibraryContext;
use crate::output::{ListedEntry, print_entries};

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Search text; case and whitespace are ignored
    pub query: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Execute the search command
pub fn execute(ctx: &LibraryContext, args: SearchArgs) -> Result<()> {
    let search_dir = ctx.search_dir(None)?;
    let (mut catalog, _) = ctx.open_catalog(&search_dir, true);

    let entries = search(&mut catalog, &args.query);
    if entries.is_empty() && !args.json {
        println!("No matches for '{}'", args.query);
        return Ok(());
    }
    print_entries(&entries, args.json)
}

/// Apply `query` and collect the visible rows.
pub fn search<'a>(catalog: &'a mut RomCatalog, query: &str) -> Vec<ListedEntry<'a>> {
    catalog
        .filter(query)
        .into_iter()
        .map(ListedEntry::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use romshelf_core::library::{RomEntry, TitleMetadata};

    fn rom(name: &str) -> RomEntry {
        RomEntry::with_metadata(
            format!("/roms/{}.nro", name),
            TitleMetadata {
                name: name.to_string(),
                author: "Dev".to_string(),
                icon: None,
                from_record: true,
            },
        )
    }

    #[test]
    fn test_search_returns_only_roms() {
        let mut catalog = RomCatalog::new();
        catalog.add_header("NROs");
        catalog.add_leaf(rom("Tetris"));
        catalog.add_leaf(rom("Zelda"));

        let rows = search(&mut catalog, "TET RIS");
        assert_eq!(rows.len(), 1);
        assert!(matches!(&rows[0], ListedEntry::Rom { title, .. } if title == "Tetris (NRO)"));
    }

    #[test]
    fn test_empty_query_lists_everything() {
        let mut catalog = RomCatalog::new();
        catalog.add_header("NROs");
        catalog.add_leaf(rom("Tetris"));

        let rows = search(&mut catalog, "   ");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ListedEntry::Header { label: "NROs" });
    }
}
