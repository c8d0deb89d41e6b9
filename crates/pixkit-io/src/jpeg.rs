//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder` and always yields 8-bit [`Rgb`];
//! grayscale and CMYK sources are expanded. Encoding goes through
//! `jpeg-encoder` with a fixed policy:
//!
//! - 4:2:0 chroma subsampling
//! - baseline (sequential) scan
//! - JFIF density of 72x72 dpi
//!
//! Only the quality is configurable, via [`JpegWriterOptions`].
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgb};
//! use pixkit_io::jpeg::{JpegWriter, JpegWriterOptions};
//! use pixkit_io::FormatWriter;
//!
//! let image = PixelBuffer::filled(16, 16, Rgb::gray(128));
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! let bytes = writer.write_to_memory(&image)?;
//! assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
//! # Ok::<(), pixkit_io::IoError>(())
//! ```

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use pixkit_core::{PixelBuffer, Rgb};
use std::io::Cursor;
use tracing::{trace, warn};

/// Quality used when none is given, matching a compression factor of 0.75.
pub const DEFAULT_QUALITY: u8 = 75;

/// JFIF pixel density written into every file.
const DENSITY_DPI: u16 = 72;

// ============================================================================
// Options
// ============================================================================

/// Options for writing JPEG files.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    /// Out-of-range values are clamped. Default: 75.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

// ============================================================================
// JpegReader
// ============================================================================

/// JPEG reader producing [`Rgb`] buffers.
///
/// Reading is fully automatic and takes no options.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl FormatReader for JpegReader {
    type Pixel = Rgb;

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer<Rgb>> {
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        let pixels = decoder.decode()?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::UnsupportedLayout("JPEG without frame header".into()))?;

        trace!(
            width = info.width,
            height = info.height,
            pixel_format = ?info.pixel_format,
            "decoded JPEG frame"
        );

        let rgb: Vec<u8> = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            // 16-bit samples, keep the high byte.
            jpeg_decoder::PixelFormat::L16 => pixels
                .chunks_exact(2)
                .flat_map(|l16| [l16[0], l16[0], l16[0]])
                .collect(),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| cmyk_to_rgb(cmyk[0], cmyk[1], cmyk[2], cmyk[3]))
                .collect(),
        };

        Ok(PixelBuffer::from_bytes(
            u32::from(info.width),
            u32::from(info.height),
            rgb,
        )?)
    }
}

/// Naive CMYK to RGB.
fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> [u8; 3] {
    let k = 1.0 - f32::from(k) / 255.0;
    let channel = |v: u8| ((1.0 - f32::from(v) / 255.0) * k * 255.0) as u8;
    [channel(c), channel(m), channel(y)]
}

// ============================================================================
// JpegWriter
// ============================================================================

/// JPEG writer consuming [`Rgb`] buffers.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 75).
    pub fn new() -> Self {
        Self::with_options(JpegWriterOptions::default())
    }

    /// Quality actually handed to the encoder.
    fn quality(&self) -> u8 {
        let quality = self.options.quality;
        let clamped = quality.clamp(1, 100);
        if clamped != quality {
            warn!(quality, clamped, "JPEG quality out of range");
        }
        clamped
    }
}

impl FormatWriter<JpegWriterOptions> for JpegWriter {
    type Pixel = Rgb;

    fn write_to_memory(&self, image: &PixelBuffer<Rgb>) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Density, Encoder, SamplingFactor};

        let (width, height) = image.dimensions();
        let too_large =
            || IoError::InvalidDimensions(format!("{width}x{height} exceeds JPEG limit of 65535"));
        let w = u16::try_from(width).map_err(|_| too_large())?;
        let h = u16::try_from(height).map_err(|_| too_large())?;

        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer, self.quality());
        encoder.set_sampling_factor(SamplingFactor::R_4_2_0);
        encoder.set_progressive(false);
        encoder.set_density(Density::Inch {
            x: DENSITY_DPI,
            y: DENSITY_DPI,
        });
        encoder.encode(image.as_bytes(), w, h, ColorType::Rgb)?;

        Ok(buffer)
    }

    fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }
}
