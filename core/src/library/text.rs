//! User-visible strings needed by the catalog core.
//!
//! Front ends with their own localisation implement [`TextLookup`] and hand
//! it to the [`FormatReader`](super::FormatReader) and the refresh flow.

/// Identifies a string the core needs to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    /// Author substituted when a ROM has no readable `ASET` metadata
    AsetMissing,
    /// Header placed above the scanned ROMs
    RomHeader,
    /// Header shown alone when a scan found nothing
    NoRoms,
}

/// Text lookup service.
pub trait TextLookup: Send + Sync {
    /// Returns the display string for `key`.
    fn text(&self, key: TextKey) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishText;

impl TextLookup for EnglishText {
    fn text(&self, key: TextKey) -> String {
        match key {
            TextKey::AsetMissing => "missing",
            TextKey::RomHeader => "NROs",
            TextKey::NoRoms => "No ROMs found",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_text_is_non_empty() {
        for key in [TextKey::AsetMissing, TextKey::RomHeader, TextKey::NoRoms] {
            assert!(!EnglishText.text(key).is_empty());
        }
    }

    #[test]
    fn test_missing_sentinel() {
        assert_eq!(EnglishText.text(TextKey::AsetMissing), "missing");
    }
}
