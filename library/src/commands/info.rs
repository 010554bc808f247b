//! Info command - show what the reader sees inside a single ROM

use anyhow::{Context, Result};
use clap::Args;
use romshelf_core::library::{AsetLayout, FormatReader, RomEntry};
use romshelf_shared::NRO_FORMAT;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::context::LibraryContext;
use crate::output::IconSize;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// ROM file to inspect
    pub rom: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Everything known about one ROM file.
#[derive(Debug, Serialize)]
pub struct RomInfo {
    pub path: PathBuf,
    /// Base magic matched
    pub verified: bool,
    pub title: String,
    pub name: String,
    pub author: String,
    /// Name and author came from the metadata record
    pub from_record: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<AsetLayout>,
    /// Why the `ASET` layout could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_error: Option<String>,
}

impl RomInfo {
    pub fn read(path: &Path, reader: &FormatReader) -> Self {
        let verified = reader.verify(path);
        let (layout, layout_error) = match reader.inspect(path) {
            Ok(layout) => (Some(layout), None),
            Err(e) => (None, Some(e.to_string())),
        };
        let entry = RomEntry::new(path, reader);

        Self {
            path: path.to_path_buf(),
            verified,
            title: entry.title(),
            name: entry.name().to_string(),
            author: entry.author().to_string(),
            from_record: entry.metadata().from_record,
            icon: entry.icon().map(IconSize::from),
            layout,
            layout_error,
        }
    }

    fn print_text(&self) {
        println!("=== {} ===", self.title);
        println!("  Path:     {}", self.path.display());
        println!("  Verified: {}", if self.verified { "yes" } else { "no" });
        println!("  Name:     {}", self.name);
        println!("  Author:   {}", self.author);
        if !self.from_record {
            println!("  (no metadata record, using fallback values)");
        }
        match &self.icon {
            Some(icon) => println!("  Icon:     {}x{}", icon.width, icon.height),
            None => println!("  Icon:     none"),
        }
        if let Some(layout) = &self.layout {
            println!("  ASET:     0x{:X}", layout.segment_offset);
            if let Some(span) = layout.icon {
                println!("    icon     0x{:X} ({} bytes)", span.offset, span.size);
            }
            if let Some(span) = layout.metadata {
                println!("    metadata 0x{:X} ({} bytes)", span.offset, span.size);
            }
        }
        if let Some(err) = &self.layout_error {
            println!("  ASET:     {}", err);
        }
    }
}

/// Execute the info command
pub fn execute(ctx: &LibraryContext, args: InfoArgs) -> Result<()> {
    if !args.rom.is_file() {
        anyhow::bail!("ROM not found: {}", args.rom.display());
    }
    let has_rom_extension = args
        .rom
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| NRO_FORMAT.matches_extension(ext));
    if !has_rom_extension {
        tracing::warn!(
            "{} does not have a .{} extension and would be skipped by a scan",
            args.rom.display(),
            NRO_FORMAT.extension
        );
    }

    let info = RomInfo::read(&args.rom, &ctx.reader);
    if args.json {
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize ROM info")?;
        println!("{}", json);
    } else {
        info.print_text();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_info_for_non_rom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("readme.nro");
        std::fs::write(&path, b"hello").unwrap();

        let info = RomInfo::read(&path, &FormatReader::default());
        assert!(!info.verified);
        assert_eq!(info.name, "readme.nro");
        assert_eq!(info.author, "missing");
        assert!(!info.from_record);
        assert!(info.layout.is_none());
        assert!(info.layout_error.is_some());
    }
}
