//! Packed pixel buffers.
//!
//! This module provides the core image container types:
//! - [`PixelBuffer`] - Owned, packed buffer of pixels of one [`PixelCodec`] format
//! - [`Row`] - Immutable window over one row of a buffer
//! - [`RowMut`] - Mutable window over one row of a buffer
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, left-to-right, with no
//! padding between pixels or rows:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! The byte count is always `width * height * P::STRIDE`.
//!
//! # Usage
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgba};
//!
//! let img = PixelBuffer::filled(4, 3, Rgba::opaque(255, 0, 0));
//! assert_eq!(img.as_bytes().len(), 4 * 3 * 4);
//! assert_eq!(img.pixel(2, 3), Rgba::opaque(255, 0, 0));
//!
//! let darker = img.map_pixels(|px| Rgba::new(px.red / 2, px.green, px.blue, px.alpha));
//! assert_eq!(darker.pixel(0, 0).red, 127);
//! assert_eq!(img.pixel(0, 0).red, 255);
//! ```

use crate::{Error, PixelCodec, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Owned image buffer with a compile-time pixel format.
///
/// `PixelBuffer<P>` stores `width * height` pixels of format `P`, each
/// encoded into `P::STRIDE` bytes of a single contiguous `Vec<u8>`.
///
/// Transforms ([`map_pixels`](Self::map_pixels),
/// [`convert`](Self::convert)) always allocate a new buffer and leave the
/// receiver untouched. In-place writes go through `&mut self`.
///
/// # Example
///
/// ```rust
/// use pixkit_core::{PixelBuffer, Rgb};
///
/// let pixels = vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
/// let img = PixelBuffer::from_pixels(2, 1, &pixels).unwrap();
/// assert_eq!(img.as_bytes(), &[1, 2, 3, 4, 5, 6]);
/// assert_eq!(img.pixels(), pixels);
/// ```
pub struct PixelBuffer<P: PixelCodec> {
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Packed pixel bytes
    bytes: Vec<u8>,
    /// Pixel format marker
    _pixel: PhantomData<fn() -> P>,
}

/// Number of bytes a `width` x `height` buffer of `P` needs, or `None` on overflow.
fn byte_len<P: PixelCodec>(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(P::STRIDE)
}

impl<P: PixelCodec> PixelBuffer<P> {
    /// Creates a buffer with every byte set to zero.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * P::STRIDE` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        let len = byte_len::<P>(width, height).expect("image size overflows usize");
        Self::from_parts(width, height, vec![0u8; len])
    }

    /// Creates a buffer from raw packed bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `bytes.len()` is not exactly
    /// `width * height * P::STRIDE`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::{PixelBuffer, Rgba};
    ///
    /// assert!(PixelBuffer::<Rgba>::from_bytes(2, 2, vec![0; 16]).is_ok());
    /// assert!(PixelBuffer::<Rgba>::from_bytes(2, 2, vec![0; 15]).is_err());
    /// ```
    pub fn from_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        let expected = byte_len::<P>(width, height).ok_or_else(|| {
            Error::invalid_dimensions(width, height, "byte size overflows usize")
        })?;
        if bytes.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, bytes.len()),
            ));
        }
        Ok(Self::from_parts(width, height, bytes))
    }

    /// Creates a buffer by encoding a row-major sequence of pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelCountMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: &[P]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows usize"))?;
        if pixels.len() != expected {
            return Err(Error::pixel_count_mismatch(
                width,
                height,
                expected,
                pixels.len(),
            ));
        }
        let mut bytes = vec![0u8; expected * P::STRIDE];
        for (chunk, pixel) in bytes.chunks_exact_mut(P::STRIDE).zip(pixels) {
            pixel.encode(chunk);
        }
        Ok(Self::from_parts(width, height, bytes))
    }

    /// Creates a buffer filled with a single pixel value.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * P::STRIDE` overflows `usize`.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        let mut img = Self::new(width, height);
        for chunk in img.bytes.chunks_exact_mut(P::STRIDE) {
            pixel.encode(chunk);
        }
        img
    }

    /// Wraps bytes whose length the caller has already validated.
    #[inline]
    pub(crate) fn from_parts(width: u32, height: u32, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(Some(bytes.len()), byte_len::<P>(width, height));
        Self {
            width,
            height,
            bytes,
            _pixel: PhantomData,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of bytes per pixel.
    #[inline]
    pub const fn stride(&self) -> usize {
        P::STRIDE
    }

    /// Returns the number of bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * P::STRIDE
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the packed pixel bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer and returns the packed pixel bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    #[inline]
    fn pixel_offset(&self, row: u32, column: u32) -> usize {
        (row as usize * self.width as usize + column as usize) * P::STRIDE
    }

    /// Returns the pixel at (`row`, `column`).
    ///
    /// # Panics
    ///
    /// Panics unless `row < height` and `column < width`.
    #[inline]
    pub fn pixel(&self, row: u32, column: u32) -> P {
        assert!(row < self.height, "row {row} out of bounds for height {}", self.height);
        assert!(
            column < self.width,
            "column {column} out of bounds for width {}",
            self.width
        );
        let offset = self.pixel_offset(row, column);
        P::decode(&self.bytes[offset..offset + P::STRIDE])
    }

    /// Returns the pixel at (`row`, `column`), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, row: u32, column: u32) -> Option<P> {
        if row < self.height && column < self.width {
            Some(self.pixel(row, column))
        } else {
            None
        }
    }

    /// Re-encodes the pixel at (`row`, `column`) in place.
    ///
    /// # Panics
    ///
    /// Panics unless `row < height` and `column < width`.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, column: u32, pixel: P) {
        self.row_mut(row).set_column(column, pixel);
    }

    /// Returns a view over one row.
    ///
    /// # Panics
    ///
    /// Panics unless `row < height`.
    pub fn row(&self, row: u32) -> Row<'_, P> {
        assert!(row < self.height, "row {row} out of bounds for height {}", self.height);
        let start = row as usize * self.row_stride();
        let end = start + self.row_stride();
        Row {
            width: self.width,
            bytes: &self.bytes[start..end],
            _pixel: PhantomData,
        }
    }

    /// Returns a mutable view over one row.
    ///
    /// # Panics
    ///
    /// Panics unless `row < height`.
    pub fn row_mut(&mut self, row: u32) -> RowMut<'_, P> {
        assert!(row < self.height, "row {row} out of bounds for height {}", self.height);
        let start = row as usize * self.row_stride();
        let end = start + self.row_stride();
        RowMut {
            width: self.width,
            bytes: &mut self.bytes[start..end],
            _pixel: PhantomData,
        }
    }

    /// Iterates over all rows, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_, P>> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Lazily decodes every pixel in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = P> + '_ {
        self.bytes.chunks_exact(P::STRIDE).map(P::decode)
    }

    /// Decodes every pixel into a new vector, row-major.
    pub fn pixels(&self) -> Vec<P> {
        self.iter().collect()
    }

    /// Applies `f` to every pixel and returns the result as a new buffer.
    ///
    /// The receiver is not modified. `f` sees each pixel independently.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixkit_core::{PixelBuffer, Rgb};
    ///
    /// let img = PixelBuffer::filled(10, 10, Rgb::gray(100));
    /// let inverted = img.map_pixels(|px| Rgb::new(255 - px.red, 255 - px.green, 255 - px.blue));
    /// assert_eq!(inverted.pixel(0, 0), Rgb::gray(155));
    /// ```
    pub fn map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn(P) -> P,
    {
        let mut bytes = vec![0u8; self.bytes.len()];
        for (src, dst) in self
            .bytes
            .chunks_exact(P::STRIDE)
            .zip(bytes.chunks_exact_mut(P::STRIDE))
        {
            f(P::decode(src)).encode(dst);
        }
        Self::from_parts(self.width, self.height, bytes)
    }

    /// Parallel variant of [`map_pixels`](Self::map_pixels).
    ///
    /// Blocks until every pixel is transformed on the rayon pool.
    #[cfg(feature = "rayon")]
    pub fn par_map_pixels<F>(&self, f: F) -> Self
    where
        F: Fn(P) -> P + Sync,
    {
        use rayon::prelude::*;

        let mut bytes = vec![0u8; self.bytes.len()];
        self.bytes
            .par_chunks_exact(P::STRIDE)
            .zip(bytes.par_chunks_exact_mut(P::STRIDE))
            .for_each(|(src, dst)| f(P::decode(src)).encode(dst));
        Self::from_parts(self.width, self.height, bytes)
    }
}

impl<P: PixelCodec> Clone for PixelBuffer<P> {
    fn clone(&self) -> Self {
        Self::from_parts(self.width, self.height, self.bytes.clone())
    }
}

impl<P: PixelCodec> PartialEq for PixelBuffer<P> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.bytes == other.bytes
    }
}

impl<P: PixelCodec> Eq for PixelBuffer<P> {}

impl<P: PixelCodec> Hash for PixelBuffer<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.bytes.hash(state);
    }
}

impl<P: PixelCodec> fmt::Debug for PixelBuffer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &P::STRIDE)
            .field("format", &std::any::type_name::<P>())
            .finish()
    }
}

/// Immutable view over the bytes of one buffer row.
#[derive(Clone, Copy)]
pub struct Row<'a, P: PixelCodec> {
    width: u32,
    bytes: &'a [u8],
    _pixel: PhantomData<fn() -> P>,
}

impl<'a, P: PixelCodec> Row<'a, P> {
    /// Returns the number of pixels in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize
    }

    /// Returns `true` if the row holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Returns the raw bytes of this row.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns the pixel at `column`.
    ///
    /// # Panics
    ///
    /// Panics unless `column < width`.
    #[inline]
    pub fn column(&self, column: u32) -> P {
        assert!(
            column < self.width,
            "column {column} out of bounds for width {}",
            self.width
        );
        let start = column as usize * P::STRIDE;
        P::decode(&self.bytes[start..start + P::STRIDE])
    }

    /// Returns the pixel at `column`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, column: u32) -> Option<P> {
        (column < self.width).then(|| self.column(column))
    }

    /// Lazily decodes the pixels of this row, left to right.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = P> + 'a {
        self.bytes.chunks_exact(P::STRIDE).map(P::decode)
    }
}

impl<P: PixelCodec> fmt::Debug for Row<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row").field("width", &self.width).finish()
    }
}

/// Mutable view over the bytes of one buffer row.
///
/// Holding a `RowMut` requires exclusive access to the owning buffer.
pub struct RowMut<'a, P: PixelCodec> {
    width: u32,
    bytes: &'a mut [u8],
    _pixel: PhantomData<fn() -> P>,
}

impl<P: PixelCodec> RowMut<'_, P> {
    /// Returns the number of pixels in the row.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize
    }

    /// Returns `true` if the row holds no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Returns the pixel at `column`.
    ///
    /// # Panics
    ///
    /// Panics unless `column < width`.
    #[inline]
    pub fn column(&self, column: u32) -> P {
        let start = self.column_offset(column);
        P::decode(&self.bytes[start..start + P::STRIDE])
    }

    /// Re-encodes the pixel at `column`, touching exactly `P::STRIDE` bytes.
    ///
    /// # Panics
    ///
    /// Panics unless `column < width`.
    #[inline]
    pub fn set_column(&mut self, column: u32, pixel: P) {
        let start = self.column_offset(column);
        pixel.encode(&mut self.bytes[start..start + P::STRIDE]);
    }

    #[inline]
    fn column_offset(&self, column: u32) -> usize {
        assert!(
            column < self.width,
            "column {column} out of bounds for width {}",
            self.width
        );
        column as usize * P::STRIDE
    }
}

impl<P: PixelCodec> fmt::Debug for RowMut<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowMut").field("width", &self.width).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hsv, Rgb, Rgba};

    fn gradient(width: u32, height: u32) -> PixelBuffer<Rgba> {
        let pixels: Vec<Rgba> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Rgba::new(x as u8, y as u8, 7, 200)))
            .collect();
        PixelBuffer::from_pixels(width, height, &pixels).unwrap()
    }

    #[test]
    fn test_buffer_new() {
        let img: PixelBuffer<Rgb> = PixelBuffer::new(100, 50);
        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.as_bytes().len(), 100 * 50 * 3);
        assert_eq!(img.row_stride(), 300);
        assert_eq!(img.pixel(49, 99), Rgb::black());
    }

    #[test]
    fn test_from_bytes_wrong_size() {
        let result = PixelBuffer::<Rgba>::from_bytes(2, 2, vec![0; 15]);
        match result {
            Err(Error::InvalidDimensions { width, height, reason }) => {
                assert_eq!((width, height), (2, 2));
                assert!(reason.contains("16"));
            }
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn test_from_bytes_empty() {
        let img = PixelBuffer::<Rgb>::from_bytes(0, 5, Vec::new()).unwrap();
        assert!(img.is_empty());
        assert!(img.pixels().is_empty());
    }

    #[test]
    fn test_from_pixels_wrong_count() {
        let result = PixelBuffer::from_pixels(2, 2, &[Rgb::white(); 3]);
        assert_eq!(result, Err(Error::pixel_count_mismatch(2, 2, 4, 3)));
    }

    #[test]
    fn test_pixel_row_major() {
        let img = gradient(4, 3);
        assert_eq!(img.pixel(0, 0), Rgba::new(0, 0, 7, 200));
        assert_eq!(img.pixel(2, 3), Rgba::new(3, 2, 7, 200));
        let offset = (2 * 4 + 3) * Rgba::STRIDE;
        assert_eq!(&img.as_bytes()[offset..offset + 4], &[3, 2, 7, 200]);
    }

    #[test]
    #[should_panic(expected = "row 3 out of bounds")]
    fn test_pixel_row_upper_bound_is_exclusive() {
        gradient(4, 3).pixel(3, 0);
    }

    #[test]
    #[should_panic(expected = "column 4 out of bounds")]
    fn test_pixel_column_upper_bound_is_exclusive() {
        gradient(4, 3).pixel(0, 4);
    }

    #[test]
    fn test_get_pixel() {
        let img = gradient(4, 3);
        assert_eq!(img.get_pixel(2, 3), Some(Rgba::new(3, 2, 7, 200)));
        assert_eq!(img.get_pixel(3, 0), None);
        assert_eq!(img.get_pixel(0, 4), None);
    }

    #[test]
    fn test_row_view() {
        let img = gradient(4, 3);
        let row = img.row(1);
        assert_eq!(row.len(), 4);
        assert_eq!(row.as_bytes().len(), 16);
        assert_eq!(row.column(3), Rgba::new(3, 1, 7, 200));
        assert_eq!(row.get(4), None);
        assert_eq!(row.pixels().count(), 4);
        assert_eq!(img.rows().count(), 3);
    }

    #[test]
    #[should_panic(expected = "column 4 out of bounds")]
    fn test_row_column_upper_bound_is_exclusive() {
        gradient(4, 3).row(0).column(4);
    }

    #[test]
    fn test_set_pixel_touches_only_stride() {
        let mut img = gradient(4, 3);
        let before = img.as_bytes().to_vec();
        img.set_pixel(1, 2, Rgba::new(9, 9, 9, 9));

        let offset = (4 + 2) * Rgba::STRIDE;
        let after = img.as_bytes();
        assert_eq!(after.len(), before.len());
        assert_eq!(&after[..offset], &before[..offset]);
        assert_eq!(&after[offset..offset + 4], &[9, 9, 9, 9]);
        assert_eq!(&after[offset + 4..], &before[offset + 4..]);
    }

    #[test]
    fn test_row_mut_set_column() {
        let mut img: PixelBuffer<Hsv> = PixelBuffer::new(3, 2);
        img.row_mut(1).set_column(2, Hsv::new(120.0, 0.5, 0.25));
        assert_eq!(img.pixel(1, 2), Hsv::new(120.0, 0.5, 0.25));
        assert_eq!(img.row_mut(1).column(2), Hsv::new(120.0, 0.5, 0.25));
        assert_eq!(img.pixel(0, 2), Hsv::default());
    }

    #[test]
    fn test_map_pixels_identity() {
        let img = gradient(5, 5);
        let mapped = img.map_pixels(|px| px);
        assert_eq!(mapped, img);
    }

    #[test]
    fn test_map_pixels_leaves_original() {
        let img = gradient(5, 5);
        let snapshot = img.as_bytes().to_vec();
        let mapped = img.map_pixels(|px| Rgba::new(px.red, px.green, px.blue, 0));
        assert_eq!(img.as_bytes(), snapshot.as_slice());
        assert_eq!(mapped.dimensions(), img.dimensions());
        assert!(mapped.iter().all(|px| px.alpha == 0));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_map_pixels_matches_serial() {
        let img = gradient(16, 9);
        let f = |px: Rgba| Rgba::new(px.green, px.red, px.blue, px.alpha);
        assert_eq!(img.par_map_pixels(f), img.map_pixels(f));
    }

    #[test]
    fn test_filled_and_pixels() {
        let img = PixelBuffer::filled(3, 2, Rgb::new(1, 2, 3));
        assert_eq!(img.pixels(), vec![Rgb::new(1, 2, 3); 6]);
        assert_eq!(img.into_bytes(), [1, 2, 3].repeat(6));
    }

    #[test]
    fn test_clone_is_independent() {
        let img = gradient(2, 2);
        let mut copy = img.clone();
        copy.set_pixel(0, 0, Rgba::transparent());
        assert_eq!(img.pixel(0, 0), Rgba::new(0, 0, 7, 200));
        assert_ne!(img, copy);
    }
}
