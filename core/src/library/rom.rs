//! ROM metadata reader
//!
//! Extracts the title, author and icon a front end shows for a homebrew
//! `.nro` file. The container stores them in an optional `ASET` segment;
//! most files simply do not have one, so the reader never fails: every
//! fault degrades to [`TitleMetadata::missing`] or to an absent icon.
//!
//! Each call opens the file, reads what it needs and closes it again. No
//! handles are retained between calls.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use byteorder::{LittleEndian, ReadBytesExt};
use romshelf_shared::{ASET_FORMAT, NRO_FORMAT};
use serde::{Deserialize, Serialize};

use super::icon::{Icon, IconDecoder, ImageCrateDecoder};
use super::text::{EnglishText, TextKey, TextLookup};

/// Title metadata shown for a catalog entry.
///
/// The icon is derived data and is skipped by serialization; a cached entry
/// gets it back by parsing its ROM again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleMetadata {
    /// Display name (file name when the ROM has no metadata record)
    pub name: String,
    /// Author (the "missing" sentinel when the ROM has no metadata record)
    pub author: String,
    /// Decoded icon, if the ROM has one and it decoded
    #[serde(skip)]
    pub icon: Option<Icon>,
    /// Whether name and author came from the ROM's metadata record
    #[serde(default)]
    pub from_record: bool,
}

impl TitleMetadata {
    /// Fallback metadata: file name as title, `sentinel` as author, no icon.
    pub fn missing(file_name: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            name: file_name.into(),
            author: sentinel.into(),
            icon: None,
            from_record: false,
        }
    }
}

/// Offset and length of a block inside a ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Absolute file offset
    pub offset: u64,
    pub size: u64,
}

/// Raw `ASET` segment layout, as reported by [`FormatReader::inspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AsetLayout {
    /// Absolute offset of the `ASET` magic
    pub segment_offset: u64,
    /// Icon block, `None` when either field is zero
    pub icon: Option<Span>,
    /// Metadata record, `None` when either field is zero
    pub metadata: Option<Span>,
}

/// Errors raised while walking the container.
///
/// These never escape [`FormatReader::parse`] or [`FormatReader::verify`];
/// only [`FormatReader::inspect`] reports them.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Base header does not carry the `NRO0` magic
    #[error("not an NRO file (bad base magic)")]
    BaseMagicMismatch,

    /// Extension segment does not start with `ASET`
    #[error("no ASET segment at offset {0:#x}")]
    SegmentMagicMismatch(u64),

    /// Offset or size field is zero; the block is legitimately absent
    #[error("{0} is not present")]
    FieldAbsent(&'static str),

    /// Offset arithmetic left the addressable range
    #[error("{0} offset overflows")]
    OffsetOverflow(&'static str),

    /// Read, seek or open failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reads title metadata from ROM files.
///
/// Holds only the injected platform services; cloning is cheap.
#[derive(Clone)]
pub struct FormatReader {
    decoder: Arc<dyn IconDecoder>,
    text: Arc<dyn TextLookup>,
}

impl FormatReader {
    /// Create a reader with explicit platform services.
    pub fn new(decoder: Arc<dyn IconDecoder>, text: Arc<dyn TextLookup>) -> Self {
        Self { decoder, text }
    }

    /// The author string used when metadata is missing.
    pub fn missing_sentinel(&self) -> String {
        self.text.text(TextKey::AsetMissing)
    }

    /// Text service shared with the rest of the catalog.
    pub fn text(&self) -> &dyn TextLookup {
        self.text.as_ref()
    }

    /// Quick check that `path` is an NRO: 4 bytes at 0x10 equal `NRO0`.
    ///
    /// Any I/O failure yields `false`.
    pub fn verify(&self, path: &Path) -> bool {
        match File::open(path) {
            Ok(mut file) => self.verify_reader(&mut file),
            Err(e) => {
                tracing::debug!("Cannot open {} for verification: {}", path.display(), e);
                false
            }
        }
    }

    /// [`verify`](Self::verify) over any seekable source.
    pub fn verify_reader<R: Read + Seek>(&self, reader: &mut R) -> bool {
        check_base_magic(reader).unwrap_or(false)
    }

    /// Parse title metadata from the ROM at `path`.
    ///
    /// Never fails: see the module docs for how each fault degrades.
    pub fn parse(&self, path: &Path) -> TitleMetadata {
        let file_name = file_name_of(path);
        match File::open(path) {
            Ok(file) => self.parse_reader(&mut BufReader::new(file), &file_name),
            Err(e) => {
                tracing::warn!("Cannot open {}: {}", path.display(), e);
                TitleMetadata::missing(file_name, self.missing_sentinel())
            }
        }
    }

    /// [`parse`](Self::parse) over any seekable source.
    ///
    /// `file_name` is the title used when the metadata record is unavailable.
    pub fn parse_reader<R: Read + Seek>(&self, reader: &mut R, file_name: &str) -> TitleMetadata {
        let segment = match locate_segment(reader) {
            Ok(segment) => segment,
            Err(e) => {
                tracing::debug!("{}: {}", file_name, e);
                return TitleMetadata::missing(file_name, self.missing_sentinel());
            }
        };

        let icon = match read_icon_span(reader, segment).and_then(|span| read_block(reader, span)) {
            Ok(bytes) => match self.decoder.decode(&bytes) {
                Ok(icon) => Some(icon),
                Err(e) => {
                    tracing::debug!("{}: {}", file_name, e);
                    None
                }
            },
            Err(e) => {
                tracing::debug!("{}: {}", file_name, e);
                None
            }
        };

        match read_metadata_span(reader, segment).and_then(|span| read_record(reader, span)) {
            Ok((name, author)) => TitleMetadata {
                name,
                author,
                icon,
                from_record: true,
            },
            Err(e) => {
                tracing::debug!("{}: {}", file_name, e);
                TitleMetadata {
                    icon,
                    ..TitleMetadata::missing(file_name, self.missing_sentinel())
                }
            }
        }
    }

    /// Report the raw `ASET` layout of the ROM at `path`.
    ///
    /// Unlike [`parse`](Self::parse) this surfaces every fault; zero fields
    /// are reported as `None` rather than as errors.
    pub fn inspect(&self, path: &Path) -> Result<AsetLayout, FormatError> {
        let mut reader = BufReader::new(File::open(path)?);
        self.inspect_reader(&mut reader)
    }

    /// [`inspect`](Self::inspect) over any seekable source.
    pub fn inspect_reader<R: Read + Seek>(&self, reader: &mut R) -> Result<AsetLayout, FormatError> {
        if !check_base_magic(reader)? {
            return Err(FormatError::BaseMagicMismatch);
        }
        let segment_offset = locate_segment(reader)?;
        Ok(AsetLayout {
            segment_offset,
            icon: absent_as_none(read_icon_span(reader, segment_offset))?,
            metadata: absent_as_none(read_metadata_span(reader, segment_offset))?,
        })
    }
}

impl Default for FormatReader {
    fn default() -> Self {
        Self::new(Arc::new(ImageCrateDecoder), Arc::new(EnglishText))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn check_base_magic<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    reader.seek(SeekFrom::Start(NRO_FORMAT.magic_offset))?;
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    Ok(&magic == NRO_FORMAT.magic)
}

/// Follow the header pointer and check the `ASET` magic.
///
/// Returns the absolute offset of the segment.
fn locate_segment<R: Read + Seek>(reader: &mut R) -> Result<u64, FormatError> {
    reader.seek(SeekFrom::Start(NRO_FORMAT.segment_pointer_offset))?;
    let segment = u64::from(reader.read_u32::<LittleEndian>()?);

    reader.seek(SeekFrom::Start(segment))?;
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != ASET_FORMAT.magic {
        return Err(FormatError::SegmentMagicMismatch(segment));
    }
    Ok(segment)
}

fn read_icon_span<R: Read + Seek>(reader: &mut R, segment: u64) -> Result<Span, FormatError> {
    reader.seek(SeekFrom::Start(segment_field(
        segment,
        ASET_FORMAT.icon_field_offset,
        "icon field",
    )?))?;
    let offset = reader.read_u64::<LittleEndian>()?;
    let size = reader.read_u32::<LittleEndian>()?;
    resolve_span(segment, offset, u64::from(size), "icon")
}

fn read_metadata_span<R: Read + Seek>(reader: &mut R, segment: u64) -> Result<Span, FormatError> {
    reader.seek(SeekFrom::Start(segment_field(
        segment,
        ASET_FORMAT.metadata_field_offset,
        "metadata field",
    )?))?;
    let offset = reader.read_u64::<LittleEndian>()?;
    let size = reader.read_u64::<LittleEndian>()?;
    resolve_span(segment, offset, size, "metadata")
}

fn segment_field(segment: u64, field: u64, what: &'static str) -> Result<u64, FormatError> {
    segment
        .checked_add(field)
        .ok_or(FormatError::OffsetOverflow(what))
}

fn resolve_span(
    segment: u64,
    offset: u64,
    size: u64,
    what: &'static str,
) -> Result<Span, FormatError> {
    if offset == 0 || size == 0 {
        return Err(FormatError::FieldAbsent(what));
    }
    Ok(Span {
        offset: segment_field(segment, offset, what)?,
        size,
    })
}

/// Read a whole block, failing on short reads.
///
/// Bytes are pulled through `take` so a corrupt size cannot force a huge
/// allocation up front.
fn read_block<R: Read + Seek>(reader: &mut R, span: Span) -> Result<Vec<u8>, FormatError> {
    reader.seek(SeekFrom::Start(span.offset))?;
    let mut bytes = Vec::new();
    reader.by_ref().take(span.size).read_to_end(&mut bytes)?;
    if (bytes.len() as u64) < span.size {
        return Err(FormatError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("block at {:#x} truncated", span.offset),
        )));
    }
    Ok(bytes)
}

/// Read the fixed name and author fields of the metadata record.
fn read_record<R: Read + Seek>(reader: &mut R, span: Span) -> Result<(String, String), FormatError> {
    reader.seek(SeekFrom::Start(span.offset))?;
    let mut name = vec![0u8; ASET_FORMAT.name_len];
    reader.read_exact(&mut name)?;
    let mut author = vec![0u8; ASET_FORMAT.author_len];
    reader.read_exact(&mut author)?;
    Ok((padded_text(&name), padded_text(&author)))
}

fn padded_text(field: &[u8]) -> String {
    String::from_utf8_lossy(field)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

fn absent_as_none(result: Result<Span, FormatError>) -> Result<Option<Span>, FormatError> {
    match result {
        Ok(span) => Ok(Some(span)),
        Err(FormatError::FieldAbsent(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
