//! Error types for pixkit-core operations.
//!
//! Only recoverable construction failures are reported through [`Error`].
//! Indexing outside a buffer and broken internal invariants are programmer
//! errors and panic instead.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{Error, PixelBuffer, Result, Rgba};
//!
//! fn blank(width: u32, height: u32, bytes: Vec<u8>) -> Result<PixelBuffer<Rgba>> {
//!     PixelBuffer::from_bytes(width, height, bytes)
//! }
//!
//! let err = blank(2, 2, vec![0; 15]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building pixel buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Byte count does not match `width * height * stride`.
    ///
    /// Also returned when the expected size overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Number of typed pixels does not match `width * height`.
    #[error("pixel count mismatch for {width}x{height}: expected {expected}, got {got}")]
    PixelCountMismatch {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Expected pixel count
        expected: usize,
        /// Provided pixel count
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::PixelCountMismatch`] error.
    #[inline]
    pub fn pixel_count_mismatch(width: u32, height: u32, expected: usize, got: usize) -> Self {
        Self::PixelCountMismatch {
            width,
            height,
            expected,
            got,
        }
    }

    /// Returns `true` if this error came from a size check.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::PixelCountMismatch { .. }
        )
    }
}
