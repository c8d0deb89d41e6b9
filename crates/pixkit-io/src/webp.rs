//! WebP format support.
//!
//! Decoding goes through the `image` crate and accepts lossy and lossless
//! files, with or without alpha; it always yields [`Rgba`].
//!
//! Encoding is lossy by default, through libwebp via `webpx`, driven by
//! [`WebpWriterOptions::quality`]. Setting [`WebpWriterOptions::lossless`]
//! switches to the `image` crate's lossless encoder, which ignores quality
//! and round-trips pixels exactly.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgba};
//! use pixkit_io::webp::{WebpWriter, WebpWriterOptions};
//! use pixkit_io::FormatWriter;
//!
//! let image = PixelBuffer::filled(8, 8, Rgba::opaque(200, 40, 40));
//! let writer = WebpWriter::with_options(WebpWriterOptions {
//!     quality: 0.5,
//!     ..Default::default()
//! });
//! let bytes = writer.write_to_memory(&image)?;
//! assert_eq!(&bytes[..4], b"RIFF");
//! # Ok::<(), pixkit_io::IoError>(())
//! ```

use crate::{FormatReader, FormatWriter, IoResult};
use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use pixkit_core::{PixelBuffer, Rgba};
use tracing::{trace, warn};

/// Quality used when none is given.
pub const DEFAULT_QUALITY: f32 = 0.9;

/// WebP writer options.
#[derive(Debug, Clone)]
pub struct WebpWriterOptions {
    /// Lossy quality in `0.0..=1.0`. Default: 0.9.
    pub quality: f32,
    /// Use lossless compression. Default: false.
    pub lossless: bool,
}

impl Default for WebpWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            lossless: false,
        }
    }
}

impl WebpWriterOptions {
    /// Quality clamped to `0.0..=1.0`; non-finite values fall back to the default.
    pub fn effective_quality(&self) -> f32 {
        let quality = self.quality;
        let clamped = if quality.is_finite() {
            quality.clamp(0.0, 1.0)
        } else {
            DEFAULT_QUALITY
        };
        if clamped != quality {
            warn!(quality, clamped, "WebP quality out of range");
        }
        clamped
    }
}

/// WebP reader producing [`Rgba`] buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebpReader;

impl WebpReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl FormatReader for WebpReader {
    type Pixel = Rgba;

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer<Rgba>> {
        let img = image::load_from_memory_with_format(data, image::ImageFormat::WebP)?;
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        trace!(width, height, "decoded WebP image");
        Ok(PixelBuffer::from_bytes(width, height, rgba.into_raw())?)
    }
}

/// WebP writer consuming [`Rgba`] buffers.
#[derive(Debug, Clone, Default)]
pub struct WebpWriter {
    options: WebpWriterOptions,
}

impl WebpWriter {
    /// Creates a new writer with default options (lossy, quality 0.9).
    pub fn new() -> Self {
        Self::with_options(WebpWriterOptions::default())
    }
}

impl FormatWriter<WebpWriterOptions> for WebpWriter {
    type Pixel = Rgba;

    fn write_to_memory(&self, image: &PixelBuffer<Rgba>) -> IoResult<Vec<u8>> {
        if self.options.lossless {
            trace!("encoding WebP losslessly");
            let mut out = Vec::new();
            WebPEncoder::new_lossless(&mut out).encode(
                image.as_bytes(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )?;
            return Ok(out);
        }

        // libwebp takes quality on a 0-100 scale.
        let quality = self.options.effective_quality() * 100.0;
        trace!(quality, "encoding lossy WebP");
        Ok(webpx::encode_rgba(
            image.as_bytes(),
            image.width(),
            image.height(),
            quality,
        )?)
    }

    fn with_options(options: WebpWriterOptions) -> Self {
        Self { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageFormat, IoError};

    fn noisy(width: u32, height: u32) -> PixelBuffer<Rgba> {
        let pixels: Vec<Rgba> = (0..width * height)
            .map(|i| Rgba::opaque((i * 7) as u8, (i * 13) as u8, (i * 29) as u8))
            .collect();
        PixelBuffer::from_pixels(width, height, &pixels).unwrap()
    }

    fn lossy(quality: f32) -> WebpWriter {
        WebpWriter::with_options(WebpWriterOptions {
            quality,
            ..Default::default()
        })
    }

    #[test]
    fn test_lossless_roundtrip() {
        let pixels: Vec<Rgba> = (0..12u32 * 10)
            .map(|i| Rgba::new(i as u8, (i * 3) as u8, 200, (255 - i) as u8))
            .collect();
        let image = PixelBuffer::from_pixels(12, 10, &pixels).unwrap();

        let writer = WebpWriter::with_options(WebpWriterOptions {
            lossless: true,
            ..Default::default()
        });
        let bytes = writer.write_to_memory(&image).unwrap();
        assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::WebP));

        let loaded = WebpReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_lossy_roundtrip_keeps_dimensions() {
        let image = noisy(40, 24);
        let bytes = WebpWriter::new().write_to_memory(&image).unwrap();
        assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::WebP));

        let loaded = WebpReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.dimensions(), (40, 24));
        assert!(loaded.iter().all(|px| px.alpha == 255));
    }

    #[test]
    fn test_quality_changes_output() {
        let image = noisy(64, 64);
        let low = lossy(0.05).write_to_memory(&image).unwrap();
        let high = lossy(1.0).write_to_memory(&image).unwrap();
        assert!(low.len() < high.len(), "low={} high={}", low.len(), high.len());
    }

    #[test]
    fn test_quality_clamped() {
        assert_eq!(lossy(1.5).options.effective_quality(), 1.0);
        assert_eq!(lossy(-0.2).options.effective_quality(), 0.0);
        assert_eq!(lossy(f32::NAN).options.effective_quality(), DEFAULT_QUALITY);
        assert_eq!(WebpWriterOptions::default().effective_quality(), 0.9);
        assert!(!WebpWriterOptions::default().lossless);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = WebpReader::new()
            .read_from_memory(b"RIFF\0\0\0\0WEBPjunk")
            .unwrap_err();
        assert!(matches!(err, IoError::WebP(_)));
    }
}
