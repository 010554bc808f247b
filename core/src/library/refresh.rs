//! Startup flow: restore the catalog from its cache, or rebuild it.

use std::path::Path;

use super::catalog::{CacheError, CatalogItem};
use super::entry::{RomCatalog, RomEntry};
use super::rom::FormatReader;
use super::scan::scan_directory;
use super::text::TextKey;

/// How [`refresh`] populated the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Restored from the cache file
    Loaded,
    /// Rebuilt from a scan of the search location
    Scanned { roms: usize },
}

/// Restore `catalog` from `cache_path`, re-parsing every ROM so icons and
/// metadata reflect the files as they are now.
pub fn load_cached(
    catalog: &mut RomCatalog,
    reader: &FormatReader,
    cache_path: &Path,
) -> Result<(), CacheError> {
    catalog.load_with(cache_path, |entry: RomEntry| entry.rederive(reader))
}

/// Clear `catalog` and fill it from a scan of `search_dir`.
///
/// Found ROMs go under a single ROM header; an empty scan leaves only the
/// "no ROMs" header. Returns the number of ROMs added.
pub fn scan_into(catalog: &mut RomCatalog, reader: &FormatReader, search_dir: &Path) -> usize {
    catalog.clear();
    let roms = scan_directory(search_dir, reader);
    let count = roms.len();

    if roms.is_empty() {
        catalog.add_header(reader.text().text(TextKey::NoRoms));
    } else {
        let header = CatalogItem::Header(reader.text().text(TextKey::RomHeader));
        catalog.extend(std::iter::once(header).chain(roms.into_iter().map(CatalogItem::Leaf)));
    }
    count
}

/// Populate `catalog` for display.
///
/// With `try_load` the cache is tried first; any cache failure is logged and
/// treated as a miss. Otherwise (or on a miss) the search location is
/// scanned and the result saved back to `cache_path`. A failed save is
/// logged and does not affect the returned catalog.
pub fn refresh(
    catalog: &mut RomCatalog,
    reader: &FormatReader,
    search_dir: &Path,
    cache_path: &Path,
    try_load: bool,
) -> RefreshOutcome {
    if try_load {
        match load_cached(catalog, reader, cache_path) {
            Ok(()) => {
                tracing::info!("Loaded catalog from {}", cache_path.display());
                return RefreshOutcome::Loaded;
            }
            Err(e) => {
                tracing::warn!("Catalog cache unusable, rescanning: {}", e);
            }
        }
    }

    let roms = scan_into(catalog, reader, search_dir);

    if let Err(e) = catalog.save(cache_path) {
        tracing::warn!("Failed to save catalog cache: {}", e);
    }

    RefreshOutcome::Scanned { roms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::catalog::{CatalogEntry, CatalogLeaf, EntryKind};
    use crate::library::rom::tests::{RomBuilder, stub_reader};
    use std::fs;
    use tempfile::TempDir;

    fn library_with_roms(count: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for i in 0..count {
            fs::write(
                dir.path().join(format!("game{}.nro", i)),
                RomBuilder::new()
                    .icon(b"IMG".to_vec())
                    .record(&format!("Game {}", i), "Dev")
                    .build(),
            )
            .unwrap();
        }
        dir
    }

    #[test]
    fn test_refresh_scans_and_saves_on_cache_miss() {
        let roms = library_with_roms(2);
        let data = TempDir::new().unwrap();
        let cache = data.path().join("roms.bin");

        let mut catalog = RomCatalog::new();
        let outcome = refresh(&mut catalog, &stub_reader(), roms.path(), &cache, true);

        assert_eq!(outcome, RefreshOutcome::Scanned { roms: 2 });
        assert!(cache.exists());
        assert_eq!(catalog.len(), 3);
        assert!(matches!(catalog.entry_at(0), Some(CatalogEntry::Header("NROs"))));
    }

    #[test]
    fn test_refresh_loads_existing_cache() {
        let roms = library_with_roms(1);
        let data = TempDir::new().unwrap();
        let cache = data.path().join("roms.bin");
        let reader = stub_reader();

        refresh(&mut RomCatalog::new(), &reader, roms.path(), &cache, false);

        let mut catalog = RomCatalog::new();
        let outcome = refresh(&mut catalog, &reader, roms.path(), &cache, true);
        assert_eq!(outcome, RefreshOutcome::Loaded);
        assert_eq!(catalog.len(), 2);
        let leaf = catalog.entry_at(1).and_then(|e| e.leaf()).unwrap();
        assert_eq!(leaf.name(), "Game 0");
        assert!(leaf.has_icon(), "icon is re-derived from the ROM");
    }

    #[test]
    fn test_load_cached_keys_match_fresh_scan() {
        let roms = library_with_roms(1);
        let data = TempDir::new().unwrap();
        let cache = data.path().join("roms.bin");
        let reader = stub_reader();

        let mut scanned = RomCatalog::new();
        refresh(&mut scanned, &reader, roms.path(), &cache, false);
        let fresh_key = scanned.leaves()[0].key();
        assert_eq!(fresh_key, "Game 0 Dev");

        // Plain load keeps the stored leaves, which carry no icon
        let mut raw = RomCatalog::new();
        raw.load(&cache).unwrap();
        assert_eq!(raw.leaves()[0].key(), "Game 0");

        let mut restored = RomCatalog::new();
        load_cached(&mut restored, &reader, &cache).unwrap();
        assert_eq!(restored.leaves()[0].key(), fresh_key);
    }

    #[test]
    fn test_refresh_corrupt_cache_rescans() {
        let roms = library_with_roms(1);
        let data = TempDir::new().unwrap();
        let cache = data.path().join("roms.bin");
        fs::write(&cache, b"garbage").unwrap();

        let mut catalog = RomCatalog::new();
        let outcome = refresh(&mut catalog, &stub_reader(), roms.path(), &cache, true);
        assert_eq!(outcome, RefreshOutcome::Scanned { roms: 1 });

        // The rescan replaced the corrupt cache
        let mut reloaded = RomCatalog::new();
        reloaded.load(&cache).unwrap();
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_empty_scan_adds_no_roms_header() {
        let roms = library_with_roms(0);
        let data = TempDir::new().unwrap();

        let mut catalog = RomCatalog::new();
        let outcome = refresh(
            &mut catalog,
            &stub_reader(),
            roms.path(),
            &data.path().join("roms.bin"),
            false,
        );
        assert_eq!(outcome, RefreshOutcome::Scanned { roms: 0 });
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entry_kind(0), Some(EntryKind::Header));
        assert!(matches!(
            catalog.entry_at(0),
            Some(CatalogEntry::Header("No ROMs found"))
        ));
    }

    #[test]
    fn test_scan_into_replaces_previous_entries() {
        let roms = library_with_roms(1);
        let mut catalog = RomCatalog::new();
        catalog.add_header("Stale");
        scan_into(&mut catalog, &stub_reader(), roms.path());
        assert_eq!(catalog.headers(), &["NROs".to_string()]);
        assert_eq!(catalog.leaves().len(), 1);
    }
}
