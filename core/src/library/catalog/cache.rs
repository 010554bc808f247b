//! Catalog cache file
//!
//! # File Structure
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Magic "RSCC"                   4 bytes   │
//! │ Version                        LE u32    │
//! ├──────────────────────────────────────────┤
//! │ Snapshot (bincode)                       │
//! │ ├── leaves: Vec<T>                       │
//! │ ├── headers: Vec<String>                 │
//! │ └── projection: Vec<EntryRef>            │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Leaves are stored through their own `Serialize` impl, which for ROM
//! entries means path and text metadata only. Anything the loader cannot
//! fully trust (wrong magic, other version, short file, dangling
//! projection reference) is a [`CacheError`] and the catalog is left
//! untouched.

use std::io::{self, Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogLeaf, EntryKind, EntryRef};

const CACHE_MAGIC: &[u8; 4] = b"RSCC";
const CACHE_VERSION: u32 = 1;

/// Failure to save or restore a catalog snapshot.
///
/// On load every variant means "cache miss": rebuild from a scan.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("not a catalog cache (bad magic)")]
    BadMagic,

    #[error("unsupported cache version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("failed to encode catalog: {0}")]
    Encode(bincode::Error),

    #[error("failed to decode catalog: {0}")]
    Decode(bincode::Error),

    #[error("cache references missing {kind:?} #{index}")]
    Inconsistent { kind: EntryKind, index: usize },
}

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    leaves: &'a [T],
    headers: &'a [String],
    projection: &'a [EntryRef],
}

#[derive(Deserialize)]
struct Snapshot<T> {
    leaves: Vec<T>,
    headers: Vec<String>,
    projection: Vec<EntryRef>,
}

impl<T: Serialize> Catalog<T> {
    /// Write the backing lists and the unfiltered projection to `path`,
    /// replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        let mut bytes = CACHE_MAGIC.to_vec();
        bytes.write_u32::<LittleEndian>(CACHE_VERSION)?;
        let snapshot = SnapshotRef {
            leaves: &self.leaves,
            headers: &self.headers,
            projection: &self.projection,
        };
        bincode::serialize_into(&mut bytes, &snapshot).map_err(CacheError::Encode)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;

        tracing::debug!(
            "Saved catalog cache to {} ({} leaves, {} headers)",
            path.display(),
            self.leaves.len(),
            self.headers.len()
        );
        Ok(())
    }
}

impl<T: CatalogLeaf + DeserializeOwned> Catalog<T> {
    /// Restore a snapshot written by [`save`](Catalog::save).
    ///
    /// Leaves are installed exactly as stored, so anything skipped by their
    /// `Serialize` impl stays at its default. ROM catalogs lose their icons
    /// (and with them the author part of the search key) this way; restore
    /// those through [`load_cached`](crate::library::load_cached), which
    /// re-parses every ROM via [`load_with`](Catalog::load_with).
    pub fn load(&mut self, path: &Path) -> Result<(), CacheError> {
        self.load_with(path, |leaf| leaf)
    }

    /// Restore a snapshot, passing every leaf through `rederive` first.
    ///
    /// The catalog is only modified if the whole snapshot is valid. The
    /// active query is re-applied afterwards.
    pub fn load_with<F>(&mut self, path: &Path, rederive: F) -> Result<(), CacheError>
    where
        F: FnMut(T) -> T,
    {
        let bytes = std::fs::read(path)?;
        let snapshot: Snapshot<T> = decode(&bytes)?;
        validate(&snapshot)?;

        let leaves = snapshot.leaves.into_iter().map(rederive).collect();
        self.replace(leaves, snapshot.headers, snapshot.projection);

        tracing::debug!(
            "Loaded catalog cache from {} ({} entries)",
            path.display(),
            self.projection.len()
        );
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Snapshot<T>, CacheError> {
    let mut cursor = Cursor::new(bytes);
    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if &magic != CACHE_MAGIC {
        return Err(CacheError::BadMagic);
    }

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != CACHE_VERSION {
        return Err(CacheError::UnsupportedVersion {
            found: version,
            supported: CACHE_VERSION,
        });
    }

    // Length prefixes must fit in the remaining input
    let payload = &bytes[cursor.position() as usize..];
    bincode::deserialize(payload).map_err(CacheError::Decode)
}

fn validate<T>(snapshot: &Snapshot<T>) -> Result<(), CacheError> {
    for r in &snapshot.projection {
        let len = match r.kind {
            EntryKind::Header => snapshot.headers.len(),
            EntryKind::Leaf => snapshot.leaves.len(),
        };
        if r.index >= len {
            return Err(CacheError::Inconsistent {
                kind: r.kind,
                index: r.index,
            });
        }
    }
    Ok(())
}
