//! Shared types for the romshelf ROM catalog.

pub mod rom_format;

pub use rom_format::{ASET_FORMAT, AsetFormat, NRO_FORMAT, RomFormat};

/// File name of the catalog cache inside the data directory.
pub const DEFAULT_CACHE_FILE: &str = "roms.bin";
