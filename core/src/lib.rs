//! romshelf Core - ROM metadata and catalog engine
//!
//! This crate provides the pieces a front end needs to present a searchable
//! list of homebrew ROMs without knowing anything about the container format.
//!
//! # Architecture
//!
//! - [`FormatReader`] - Reads title, author and icon from the `ASET` segment of a ROM
//! - [`RomEntry`] - A discovered ROM file plus its parsed metadata
//! - [`Catalog`] - Header-grouped, filterable, persistable list of entries
//! - [`scan_directory`] - Walks a search location and collects verified ROMs
//! - [`refresh`] - Cache-or-rescan flow used on startup

pub mod app;
pub mod library;

pub use app::Config;
pub use library::{
    CacheError, Catalog, CatalogEntry, CatalogItem, CatalogLeaf, DataDirProvider, EntryKind,
    EntryRef, FilterConfig, FormatError, FormatReader, Icon, IconDecodeError, IconDecoder,
    ImageCrateDecoder, RefreshOutcome, RomCatalog, RomEntry, TextKey, TextLookup, TitleMetadata,
    refresh, scan_directory,
};
