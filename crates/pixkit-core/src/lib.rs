//! # pixkit-core
//!
//! Core types for pixkit: packed pixel buffers that codecs decode into and
//! encode from.
//!
//! This crate provides:
//!
//! - [`PixelCodec`] - Fixed-stride byte encoding for one pixel
//! - [`Rgb`], [`Rgba`], [`Hsv`] - Built-in pixel formats
//! - [`PixelBuffer`] - Owned row-major buffer of pixels of one format
//! - [`RgbaConvertible`] - RGBA projection used for format conversion
//! - [`rgb_to_hsv`], [`hsv_to_rgb`] - Hexcone HSV model on 8-bit RGB
//!
//! ## Design
//!
//! A buffer's pixel format is a type parameter, so all per-pixel encode and
//! decode calls are monomorphized:
//!
//! ```
//! use pixkit_core::prelude::*;
//!
//! let rgba: PixelBuffer<Rgba> = PixelBuffer::filled(8, 8, Rgba::opaque(111, 155, 169));
//! let hsv: PixelBuffer<Hsv> = rgba.convert();
//! assert!((hsv.pixel(0, 0).hue - 194.4827).abs() < 1e-3);
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! pixkit-core (this crate)
//!    ^
//!    |
//!    +-- pixkit-io (format detection, PNG/JPEG/WebP adapters)
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` - Enable [`PixelBuffer::par_map_pixels`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod error;
pub mod image;
pub mod pixel;

// Re-exports for convenience
pub use convert::{convert, hsv_to_rgb, rgb_to_hsv};
pub use error::*;
pub use image::*;
pub use pixel::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::{hsv_to_rgb, rgb_to_hsv};
    pub use crate::error::{Error, Result};
    pub use crate::image::{PixelBuffer, Row, RowMut};
    pub use crate::pixel::{Hsv, PixelCodec, Rgb, RgbaConvertible, Rgba};
}
