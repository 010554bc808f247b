//! ROM container format specifications.
//!
//! This module defines the `RomFormat` struct which serves as the single source of truth
//! for the constants of the homebrew container (file extension, magic bytes and the
//! fixed offsets of the header fields the catalog reads).
//!
//! # Example
//!
//! ```
//! use romshelf_shared::NRO_FORMAT;
//!
//! // Get the ROM file extension
//! assert_eq!(NRO_FORMAT.extension, "nro");
//!
//! // Check magic bytes
//! assert_eq!(NRO_FORMAT.magic, b"NRO0");
//! ```
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ 0x10  magic "NRO0"                  4 bytes  │
//! │ 0x18  ASET segment offset           LE u32   │
//! ├──────────────────────────────────────────────┤
//! │ ASET segment (offsets relative to its start) │
//! │ 0x00  magic "ASET"                  4 bytes  │
//! │ 0x08  icon offset                   LE u64   │
//! │ 0x10  icon size                     LE u32   │
//! │ 0x18  metadata offset               LE u64   │
//! │ 0x20  metadata size                 LE u64   │
//! ├──────────────────────────────────────────────┤
//! │ metadata record                              │
//! │ 0x000 name                          0x200    │
//! │ 0x200 author                        0x100    │
//! └──────────────────────────────────────────────┘
//! ```

/// ROM container format specification.
///
/// Defines where the base magic lives and where the pointer to the
/// optional extension segment is stored.
#[derive(Debug, Clone, Copy)]
pub struct RomFormat {
    /// ROM file extension without dot (e.g., "nro")
    pub extension: &'static str,

    /// Magic bytes identifying the container (4 bytes)
    pub magic: &'static [u8; 4],

    /// Absolute offset of the magic bytes
    pub magic_offset: u64,

    /// Absolute offset of the LE u32 holding the extension segment offset
    pub segment_pointer_offset: u64,
}

impl RomFormat {
    /// Create a new ROM format specification.
    pub const fn new(
        extension: &'static str,
        magic: &'static [u8; 4],
        magic_offset: u64,
        segment_pointer_offset: u64,
    ) -> Self {
        Self {
            extension,
            magic,
            magic_offset,
            segment_pointer_offset,
        }
    }

    /// Case-insensitive extension check (`"NRO"` matches `"nro"`).
    pub fn matches_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case(self.extension)
    }
}

/// Layout of the asset extension segment.
///
/// Every offset is relative to the start of the segment.
#[derive(Debug, Clone, Copy)]
pub struct AsetFormat {
    /// Segment magic (4 bytes)
    pub magic: &'static [u8; 4],
    /// Reserved bytes between the magic and the icon offset
    pub reserved_len: u64,
    /// Offset of the LE u64 icon offset / LE u32 icon size pair
    pub icon_field_offset: u64,
    /// Offset of the LE u64 metadata offset / LE u64 metadata size pair
    pub metadata_field_offset: u64,
    /// Length of the padded name field of the metadata record
    pub name_len: usize,
    /// Length of the padded author field, directly after the name
    pub author_len: usize,
}

/// Homebrew ROM container (`.nro`).
pub const NRO_FORMAT: RomFormat = RomFormat::new("nro", b"NRO0", 0x10, 0x18);

/// Asset segment embedded in `.nro` files.
pub const ASET_FORMAT: AsetFormat = AsetFormat {
    magic: b"ASET",
    reserved_len: 0x4,
    icon_field_offset: 0x8,
    metadata_field_offset: 0x18,
    name_len: 0x200,
    author_len: 0x100,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nro_format_extension() {
        assert_eq!(NRO_FORMAT.extension, "nro");
    }

    #[test]
    fn test_nro_format_magic() {
        assert_eq!(NRO_FORMAT.magic, b"NRO0");
        assert_eq!(NRO_FORMAT.magic_offset, 0x10);
        assert_eq!(NRO_FORMAT.segment_pointer_offset, 0x18);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(NRO_FORMAT.matches_extension("nro"));
        assert!(NRO_FORMAT.matches_extension("NRO"));
        assert!(!NRO_FORMAT.matches_extension("nso"));
        assert!(!NRO_FORMAT.matches_extension(""));
    }

    #[test]
    fn test_aset_layout_is_contiguous() {
        // magic + reserved lands exactly on the icon field
        assert_eq!(
            ASET_FORMAT.magic.len() as u64 + ASET_FORMAT.reserved_len,
            ASET_FORMAT.icon_field_offset
        );
        assert_eq!(ASET_FORMAT.name_len + ASET_FORMAT.author_len, 0x300);
    }
}
