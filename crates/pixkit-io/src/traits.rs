//! Reader and writer traits for format adapters.
//!
//! Every adapter works on in-memory byte slices only. A reader produces a
//! buffer in its codec's canonical pixel format; a writer consumes one.
//! Naming and sniffing live on [`ImageFormat`](crate::ImageFormat).

use crate::IoResult;
use pixkit_core::{PixelBuffer, PixelCodec};

/// Trait for image format readers.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "png")] {
/// use pixkit_core::{PixelBuffer, Rgba};
/// use pixkit_io::png::{PngReader, PngWriter};
/// use pixkit_io::{FormatReader, FormatWriter};
///
/// let bytes = PngWriter::new().write_to_memory(&PixelBuffer::filled(2, 2, Rgba::transparent()))?;
/// let image = PngReader::new().read_from_memory(&bytes)?;
/// assert_eq!(image.dimensions(), (2, 2));
/// # }
/// # Ok::<(), pixkit_io::IoError>(())
/// ```
pub trait FormatReader {
    /// Canonical pixel format produced by this codec.
    type Pixel: PixelCodec;

    /// Decodes an image from a byte slice.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer<Self::Pixel>>;
}

/// Trait for image format writers.
///
/// `O` is the writer's options type.
pub trait FormatWriter<O>: Sized {
    /// Canonical pixel format consumed by this codec.
    type Pixel: PixelCodec;

    /// Encodes an image into a fresh byte vector.
    fn write_to_memory(&self, image: &PixelBuffer<Self::Pixel>) -> IoResult<Vec<u8>>;

    /// Creates a writer with custom options.
    fn with_options(options: O) -> Self;
}
