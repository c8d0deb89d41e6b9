//! PNG format support.
//!
//! Decodes any PNG the `png` crate understands into 8-bit RGBA. Palette,
//! low bit depth and `tRNS` transparency are expanded by the decoder;
//! 16-bit samples are stripped to their high byte; grayscale is widened
//! here.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgba};
//! use pixkit_io::png::{PngReader, PngWriter};
//! use pixkit_io::{FormatReader, FormatWriter};
//!
//! let image = PixelBuffer::filled(4, 4, Rgba::new(10, 20, 30, 40));
//! let bytes = PngWriter::new().write_to_memory(&image)?;
//! let back = PngReader::new().read_from_memory(&bytes)?;
//! assert_eq!(back, image);
//! # Ok::<(), pixkit_io::IoError>(())
//! ```

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use pixkit_core::{PixelBuffer, Rgba};
use std::io::Cursor;
use tracing::trace;

// ============================================================================
// Options
// ============================================================================

/// Deflate effort used when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Faster encoding, larger files.
    Fast,
    /// The codec's default balance.
    #[default]
    Default,
}

impl From<PngCompression> for png::Compression {
    fn from(level: PngCompression) -> Self {
        match level {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Default => png::Compression::default(),
        }
    }
}

/// Options for writing PNG files.
#[derive(Debug, Clone, Default)]
pub struct PngWriterOptions {
    /// Compression level. Default: [`PngCompression::Default`].
    pub compression: PngCompression,
}

// ============================================================================
// PngReader
// ============================================================================

/// PNG reader producing [`Rgba`] buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl FormatReader for PngReader {
    type Pixel = Rgba;

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer<Rgba>> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::InvalidDimensions("PNG frame too large".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        trace!(
            width = info.width,
            height = info.height,
            color = ?info.color_type,
            "decoded PNG frame"
        );

        let rgba = match (info.color_type, info.bit_depth) {
            (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
            (png::ColorType::Rgb, png::BitDepth::Eight) => buf
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 0xFF])
                .collect(),
            (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => buf
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            (png::ColorType::Grayscale, png::BitDepth::Eight) => {
                buf.iter().flat_map(|&g| [g, g, g, 0xFF]).collect()
            }
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedLayout(format!(
                    "PNG {color_type:?} at {bit_depth:?}"
                )));
            }
        };

        Ok(PixelBuffer::from_bytes(info.width, info.height, rgba)?)
    }
}

// ============================================================================
// PngWriter
// ============================================================================

/// PNG writer consuming [`Rgba`] buffers.
#[derive(Debug, Clone, Default)]
pub struct PngWriter {
    options: PngWriterOptions,
}

impl PngWriter {
    /// Creates a new writer with default options.
    pub fn new() -> Self {
        Self::with_options(PngWriterOptions::default())
    }
}

impl FormatWriter<PngWriterOptions> for PngWriter {
    type Pixel = Rgba;

    fn write_to_memory(&self, image: &PixelBuffer<Rgba>) -> IoResult<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(self.options.compression.into());

            let mut writer = encoder.write_header()?;
            writer.write_image_data(image.as_bytes())?;
            writer.finish()?;
        }
        Ok(out)
    }

    fn with_options(options: PngWriterOptions) -> Self {
        Self { options }
    }
}
