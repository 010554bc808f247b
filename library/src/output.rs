//! Text and JSON rendering of catalog entries.

use romshelf_core::library::{CatalogEntry, Icon, RomEntry};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Icon dimensions, reported instead of pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl From<&Icon> for IconSize {
    fn from(icon: &Icon) -> Self {
        Self {
            width: icon.width(),
            height: icon.height(),
        }
    }
}

/// One visible catalog row, as printed by `list` and `search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListedEntry<'a> {
    Header {
        label: &'a str,
    },
    Rom {
        title: String,
        author: &'a str,
        path: &'a Path,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<IconSize>,
    },
}

impl<'a> From<CatalogEntry<'a, RomEntry>> for ListedEntry<'a> {
    fn from(entry: CatalogEntry<'a, RomEntry>) -> Self {
        match entry {
            CatalogEntry::Header(label) => ListedEntry::Header { label },
            CatalogEntry::Leaf(rom) => ListedEntry::Rom {
                title: rom.title(),
                author: rom.subtitle(),
                path: rom.path(),
                icon: rom.icon().map(IconSize::from),
            },
        }
    }
}

/// Render entries one per line, ROMs indented below their header.
pub fn render_text(entries: &[ListedEntry<'_>]) -> String {
    let mut out = String::new();
    for entry in entries {
        match entry {
            ListedEntry::Header { label } => {
                let _ = writeln!(out, "{}", label);
            }
            ListedEntry::Rom {
                title,
                author,
                path,
                icon,
            } => {
                let _ = write!(out, "  {} - {}", title, author);
                if let Some(icon) = icon {
                    let _ = write!(out, " [{}x{}]", icon.width, icon.height);
                }
                let _ = writeln!(out, "\n    {}", path.display());
            }
        }
    }
    out
}

/// Render entries as a pretty-printed JSON array.
pub fn render_json(entries: &[ListedEntry<'_>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Print entries to stdout in the requested format.
pub fn print_entries(entries: &[ListedEntry<'_>], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", render_json(entries)?);
    } else {
        print!("{}", render_text(entries));
    }
    Ok(())
}
