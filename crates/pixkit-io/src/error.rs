//! Error types for I/O operations.
//!
//! Codec failures keep the codec crate's own error as their source; this
//! crate never reinterprets them.

use crate::ImageFormat;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Input bytes match no known container signature.
    #[error("unknown magic bytes")]
    UnknownMagicBytes,

    /// File extension hint names no known format.
    #[error("unknown image file extension: {0:?}")]
    UnknownFileExtension(String),

    /// Codec for this format was compiled out.
    #[error("unsupported format: {0} (feature disabled)")]
    UnsupportedFormat(ImageFormat),

    /// Image dimensions exceed what the codec can represent.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Decoded sample layout has no 8-bit RGB(A) mapping.
    #[error("unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    /// PNG decoder error.
    #[cfg(feature = "png")]
    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// PNG encoder error.
    #[cfg(feature = "png")]
    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    /// JPEG decoder error.
    #[cfg(feature = "jpeg")]
    #[error("JPEG decode error: {0}")]
    JpegDecode(#[from] jpeg_decoder::Error),

    /// JPEG encoder error.
    #[cfg(feature = "jpeg")]
    #[error("JPEG encode error: {0}")]
    JpegEncode(#[from] jpeg_encoder::EncodingError),

    /// WebP decode or lossless encode error.
    #[cfg(feature = "webp")]
    #[error("WebP error: {0}")]
    WebP(#[from] image::ImageError),

    /// libwebp lossy encoder error.
    #[cfg(feature = "webp")]
    #[error("WebP encode error: {0}")]
    WebPEncode(#[from] webpx::Error),

    /// Decoded data did not form a valid pixel buffer.
    #[error(transparent)]
    Core(#[from] pixkit_core::Error),
}

impl IoError {
    /// Returns `true` if the input could not be classified.
    #[inline]
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnknownMagicBytes | Self::UnknownFileExtension(_))
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
