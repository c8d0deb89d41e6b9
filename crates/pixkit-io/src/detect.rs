//! Format detection utilities.
//!
//! Detects image formats from magic bytes and file extensions.

use crate::IoError;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// PNG signature.
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// JPEG SOI followed by DQT, APP14, APP1 or APP0.
const JPEG_MAGIC: [[u8; 4]; 4] = [
    [0xFF, 0xD8, 0xFF, 0xDB],
    [0xFF, 0xD8, 0xFF, 0xEE],
    [0xFF, 0xD8, 0xFF, 0xE1],
    [0xFF, 0xD8, 0xFF, 0xE0],
];

/// `RIFF????WEBP`; the chunk size bytes are wildcards.
const WEBP_MAGIC: [Option<u8>; 12] = [
    Some(b'R'),
    Some(b'I'),
    Some(b'F'),
    Some(b'F'),
    None,
    None,
    None,
    None,
    Some(b'W'),
    Some(b'E'),
    Some(b'B'),
    Some(b'P'),
];

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// All supported formats, in detection order.
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

    /// Detects format from raw bytes (magic number check).
    ///
    /// PNG is checked first, then JPEG, then WebP. Returns `None` when no
    /// signature matches, including for input too short to hold one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_io::ImageFormat;
    ///
    /// let header = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
    /// assert_eq!(ImageFormat::detect(&header), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::detect(&[]), None);
    /// ```
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let format = if bytes.starts_with(&PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if JPEG_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
            Some(ImageFormat::Jpeg)
        } else if bytes.len() >= WEBP_MAGIC.len()
            && WEBP_MAGIC
                .iter()
                .zip(bytes)
                .all(|(expected, actual)| expected.is_none_or(|b| b == *actual))
        {
            Some(ImageFormat::WebP)
        } else {
            None
        };
        trace!(?format, len = bytes.len(), "sniffed magic bytes");
        format
    }

    /// Detects format from a file extension, case-insensitively.
    ///
    /// A single leading dot is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_io::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
    /// assert_eq!(ImageFormat::from_extension(".webp"), Some(ImageFormat::WebP));
    /// assert_eq!(ImageFormat::from_extension("gif"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Returns true if this format supports alpha channel.
    pub fn supports_alpha(&self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::WebP)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::WebP => "WebP",
        })
    }
}

impl FromStr for ImageFormat {
    type Err = IoError;

    /// Parses a file extension.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| IoError::UnknownFileExtension(s.to_string()))
    }
}
