//! Catalog leaf for a discovered ROM file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, CatalogLeaf};
use super::icon::Icon;
use super::rom::{FormatReader, TitleMetadata};

/// Catalog of ROM entries grouped under header labels.
pub type RomCatalog = Catalog<RomEntry>;

/// A ROM file on disk plus the metadata parsed from it.
///
/// Serializes as the path and the text metadata only; the icon is restored
/// by [`RomEntry::rederive`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomEntry {
    path: PathBuf,
    metadata: TitleMetadata,
}

impl RomEntry {
    /// Parse `path` and wrap the result.
    pub fn new(path: impl Into<PathBuf>, reader: &FormatReader) -> Self {
        let path = path.into();
        let metadata = reader.parse(&path);
        Self { path, metadata }
    }

    /// Wrap already-parsed metadata.
    pub fn with_metadata(path: impl Into<PathBuf>, metadata: TitleMetadata) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    /// Re-parse the stored path, replacing all derived metadata.
    pub fn rederive(self, reader: &FormatReader) -> Self {
        Self::new(self.path, reader)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &TitleMetadata {
        &self.metadata
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.metadata.icon.as_ref()
    }

    pub fn has_icon(&self) -> bool {
        self.metadata.icon.is_some()
    }

    /// Upper-cased file extension, e.g. `NRO`.
    pub fn file_type(&self) -> String {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_uppercase())
            .unwrap_or_default()
    }

    /// Display title: `"{name} ({TYPE})"`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.metadata.name, self.file_type())
    }

    /// Display subtitle (the author).
    pub fn subtitle(&self) -> &str {
        &self.metadata.author
    }
}

impl CatalogLeaf for RomEntry {
    /// Icon-less entries match on the name alone; entries with an icon also
    /// match on the author.
    fn key(&self) -> String {
        match self.metadata.icon {
            None => self.metadata.name.clone(),
            Some(_) => format!("{} {}", self.metadata.name, self.metadata.author),
        }
    }
}
