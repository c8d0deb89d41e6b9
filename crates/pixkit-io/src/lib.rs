//! # pixkit-io
//!
//! Loading and encoding of [`PixelBuffer`]s through external codecs.
//!
//! - **PNG** - Lossless with alpha support
//! - **JPEG** - Lossy compression, no alpha
//! - **WebP** - Lossy (default) or lossless, with alpha
//!
//! # Architecture
//!
//! - [`ImageFormat`] - Format sniffing from magic bytes or file extensions
//! - [`FormatReader`] / [`FormatWriter`] - Per-codec adapters with options
//! - [`load`] / [`encode`] - High-level functions that convert to and from
//!   any pixel format
//!
//! Everything works on in-memory bytes. Each codec has a canonical pixel
//! format (RGBA for PNG and WebP, RGB for JPEG); buffers are converted
//! through it on the way in and out, so JPEG drops alpha.
//!
//! # Quick Start
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgb, Rgba};
//! use pixkit_io::{encode, load, ImageFormat};
//!
//! let image = PixelBuffer::filled(4, 2, Rgba::new(1, 2, 3, 4));
//! let png = encode(&image, ImageFormat::Png)?;
//!
//! let rgb: PixelBuffer<Rgb> = load(&png)?;
//! assert_eq!(rgb.pixel(1, 3), Rgb::new(1, 2, 3));
//! # Ok::<(), pixkit_io::IoError>(())
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `webp` - WebP support via the `image` crate and libwebp (default)
//!
//! With a codec's feature off, its format is still detected but loading or
//! encoding it fails with [`IoError::UnsupportedFormat`].

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detect;
pub mod error;
pub mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "webp")]
pub mod webp;

pub use detect::ImageFormat;
pub use error::{IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};

use pixkit_core::{PixelBuffer, PixelCodec, RgbaConvertible};
use tracing::debug;

/// Loads an image, detecting its format from magic bytes.
///
/// # Errors
///
/// [`IoError::UnknownMagicBytes`] if no known signature matches; otherwise
/// whatever [`load_as`] returns.
pub fn load<P>(bytes: &[u8]) -> IoResult<PixelBuffer<P>>
where
    P: PixelCodec + RgbaConvertible,
{
    let format = ImageFormat::detect(bytes).ok_or(IoError::UnknownMagicBytes)?;
    load_as(bytes, format)
}

/// Loads an image as the given format, skipping detection.
///
/// The codec decides whether the bytes are acceptable; a mismatched format
/// surfaces as that codec's decode error.
pub fn load_as<P>(bytes: &[u8], format: ImageFormat) -> IoResult<PixelBuffer<P>>
where
    P: PixelCodec + RgbaConvertible,
{
    debug!(%format, len = bytes.len(), "loading image");

    let image = match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => png::PngReader::new().read_from_memory(bytes)?.into_format(),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::JpegReader::new().read_from_memory(bytes)?.into_format(),

        #[cfg(feature = "webp")]
        ImageFormat::WebP => webp::WebpReader::new().read_from_memory(bytes)?.into_format(),

        #[allow(unreachable_patterns)]
        _ => return Err(IoError::UnsupportedFormat(format)),
    };

    debug!(width = image.width(), height = image.height(), "loaded image");
    Ok(image)
}

/// Loads an image whose format is named by a file extension.
///
/// # Errors
///
/// [`IoError::UnknownFileExtension`] carrying `ext` if it names no known
/// format.
pub fn load_with_extension<P>(bytes: &[u8], ext: &str) -> IoResult<PixelBuffer<P>>
where
    P: PixelCodec + RgbaConvertible,
{
    let format: ImageFormat = ext.parse()?;
    load_as(bytes, format)
}

/// Encodes an image into the given format.
///
/// PNG and WebP are written from RGBA, JPEG from RGB.
pub fn encode<P>(image: &PixelBuffer<P>, format: ImageFormat) -> IoResult<Vec<u8>>
where
    P: PixelCodec + RgbaConvertible,
{
    debug!(
        %format,
        width = image.width(),
        height = image.height(),
        "encoding image"
    );

    let bytes = match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => png::PngWriter::new().write_to_memory(&image.convert())?,

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::JpegWriter::new().write_to_memory(&image.convert())?,

        #[cfg(feature = "webp")]
        ImageFormat::WebP => webp::WebpWriter::new().write_to_memory(&image.convert())?,

        #[allow(unreachable_patterns)]
        _ => return Err(IoError::UnsupportedFormat(format)),
    };

    debug!(len = bytes.len(), "encoded image");
    Ok(bytes)
}
