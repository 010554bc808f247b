//! Search location scanning
//!
//! Walks a directory tree and collects every file that has the ROM
//! extension and passes [`FormatReader::verify`]. Unreadable directories,
//! files without an extension and non-UTF-8 names are skipped; none of them
//! abort the scan.

use std::path::{Path, PathBuf};

use romshelf_shared::NRO_FORMAT;
use walkdir::WalkDir;

use super::entry::RomEntry;
use super::rom::FormatReader;

/// Returns the paths of all verified ROMs below `root`, in file-name order.
pub fn find_roms(root: &Path, reader: &FormatReader) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable path during scan: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let Some(ext) = path.extension() else {
                tracing::trace!("Skipping {} (no extension)", path.display());
                return None;
            };
            let Some(ext) = ext.to_str() else {
                tracing::warn!("Skipping {} (extension is not UTF-8)", path.display());
                return None;
            };
            (NRO_FORMAT.matches_extension(ext) && reader.verify(&path)).then_some(path)
        })
        .collect()
}

/// Scan `root` and parse every verified ROM into an entry.
pub fn scan_directory(root: &Path, reader: &FormatReader) -> Vec<RomEntry> {
    let roms: Vec<RomEntry> = find_roms(root, reader)
        .into_iter()
        .map(|path| RomEntry::new(path, reader))
        .collect();
    tracing::info!("Found {} ROMs in {}", roms.len(), root.display());
    roms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::rom::tests::{RomBuilder, stub_reader};
    use std::fs;
    use tempfile::TempDir;

    fn write_rom(path: &Path, name: &str) {
        fs::write(path, RomBuilder::new().record(name, "Dev").build()).unwrap();
    }

    #[test]
    fn test_finds_roms_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        write_rom(&dir.path().join("a.nro"), "A");
        write_rom(&dir.path().join("sub/b.nro"), "B");
        write_rom(&dir.path().join("sub/deeper/c.NRO"), "C");

        let found = find_roms(dir.path(), &stub_reader());
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_skips_wrong_extension_and_bad_magic() {
        let dir = TempDir::new().unwrap();
        write_rom(&dir.path().join("game.nro"), "Game");
        write_rom(&dir.path().join("game.bin"), "Renamed");
        write_rom(&dir.path().join("noext"), "NoExt");
        fs::write(dir.path().join("fake.nro"), b"this is not a rom at all").unwrap();

        let found = find_roms(dir.path(), &stub_reader());
        assert_eq!(found, vec![dir.path().join("game.nro")]);
    }

    #[test]
    fn test_scan_parses_metadata() {
        let dir = TempDir::new().unwrap();
        write_rom(&dir.path().join("b.nro"), "Second");
        write_rom(&dir.path().join("a.nro"), "First");

        let roms = scan_directory(dir.path(), &stub_reader());
        let names: Vec<&str> = roms.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_roms(&dir.path().join("absent"), &stub_reader()).is_empty());
    }
}
