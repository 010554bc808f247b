//! ROM library management
//!
//! Container parsing, catalog indexing and search, and directory discovery.

pub mod catalog;
mod data_dir;
mod entry;
pub mod icon;
mod refresh;
pub mod rom;
mod scan;
pub mod text;

pub use catalog::{
    CacheError, Catalog, CatalogEntry, CatalogItem, CatalogLeaf, EntryKind, EntryRef,
    FilterConfig,
};
pub use data_dir::DataDirProvider;
pub use entry::{RomCatalog, RomEntry};
pub use icon::{Icon, IconDecodeError, IconDecoder, ImageCrateDecoder};
pub use refresh::{RefreshOutcome, load_cached, refresh, scan_into};
pub use rom::{AsetLayout, FormatError, FormatReader, Span, TitleMetadata};
pub use scan::{find_roms, scan_directory};
pub use text::{EnglishText, TextKey, TextLookup};
