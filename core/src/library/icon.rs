//! Icon decoding
//!
//! The `ASET` icon is an encoded image (JPEG in practice). Decoding is a
//! service injected into the reader so front ends can swap in their own
//! image stack; [`ImageCrateDecoder`] is the default.

use std::fmt;

/// A decoded icon as tightly packed RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Icon {
    /// Wrap raw RGBA8 pixels.
    ///
    /// Fails if `rgba` is not exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, IconDecodeError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4));
        if expected != Some(rgba.len()) {
            return Err(IconDecodeError::Dimensions {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba
    }
}

// Pixel data is large and useless in logs
impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Errors from icon decoding. Always tolerated by the reader.
#[derive(Debug, thiserror::Error)]
pub enum IconDecodeError {
    /// The bytes are not a supported image
    #[error("icon is not a decodable image: {0}")]
    Image(#[from] image::ImageError),

    /// Pixel buffer does not match the stated dimensions
    #[error("icon pixel buffer of {len} bytes does not match {width}x{height}")]
    Dimensions { width: u32, height: u32, len: usize },
}

/// Image decoding service: encoded bytes in, displayable icon out.
pub trait IconDecoder: Send + Sync {
    /// Decode `bytes` into an icon.
    fn decode(&self, bytes: &[u8]) -> Result<Icon, IconDecodeError>;
}

/// Decoder backed by the `image` crate (PNG and JPEG).
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl IconDecoder for ImageCrateDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Icon, IconDecodeError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Icon::from_rgba(width, height, rgba.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let icon = ImageCrateDecoder.decode(&encode_png(4, 3)).unwrap();
        assert_eq!(icon.width(), 4);
        assert_eq!(icon.height(), 3);
        assert_eq!(icon.pixels().len(), 4 * 3 * 4);
        assert_eq!(&icon.pixels()[..4], &[200, 10, 10, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ImageCrateDecoder.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, IconDecodeError::Image(_)));
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Icon::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Icon::from_rgba(2, 2, vec![0; 15]),
            Err(IconDecodeError::Dimensions { len: 15, .. })
        ));
    }

    #[test]
    fn test_debug_omits_pixels() {
        let icon = Icon::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        let debug = format!("{:?}", icon);
        assert!(debug.contains("width: 1"));
        assert!(!debug.contains("rgba"));
    }
}
