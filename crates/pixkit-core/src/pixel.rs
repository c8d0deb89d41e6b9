//! Pixel types and the fixed-stride byte codec they share.
//!
//! # Types
//!
//! - [`PixelCodec`] - Trait for pixels that serialize to a fixed-width byte run
//! - [`RgbaConvertible`] - Trait for pixels that project to/from [`Rgba`]
//! - [`Rgb`] - 8-bit RGB pixel (3 bytes)
//! - [`Rgba`] - 8-bit RGBA pixel (4 bytes), the conversion hub
//! - [`Hsv`] - 64-bit float HSV pixel (24 bytes)
//!
//! # Memory Layout
//!
//! `Rgb` and `Rgba` encode their channels in declaration order, one byte
//! each. `Hsv` encodes three `f64` values in native byte order, so its
//! encoded bytes are only meaningful inside the process that wrote them.
//!
//! ```
//! use pixkit_core::{PixelCodec, Rgba};
//!
//! let mut bytes = [0u8; Rgba::STRIDE];
//! Rgba::new(255, 128, 64, 32).encode(&mut bytes);
//! assert_eq!(bytes, [255, 128, 64, 32]);
//! assert_eq!(Rgba::decode(&bytes), Rgba::new(255, 128, 64, 32));
//! ```

use byteorder::{ByteOrder, NativeEndian};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Trait for pixels stored in a packed byte buffer.
///
/// Every value of the implementing type occupies exactly [`STRIDE`](Self::STRIDE)
/// bytes. Implementations must satisfy `decode(encode(x)) == x`.
///
/// # Required Items
///
/// - [`STRIDE`](PixelCodec::STRIDE) - Encoded size of one pixel, always > 0
/// - [`decode`](PixelCodec::decode) - Total: any `STRIDE` bytes decode to some value
/// - [`encode`](PixelCodec::encode) - Writes exactly `STRIDE` bytes
pub trait PixelCodec: Copy + 'static {
    /// Number of bytes one encoded pixel occupies.
    const STRIDE: usize;

    /// Decodes a pixel from the first `STRIDE` bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than `STRIDE`.
    fn decode(bytes: &[u8]) -> Self;

    /// Encodes this pixel into the first `STRIDE` bytes of `out`.
    ///
    /// Bytes past `STRIDE` are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `STRIDE`.
    fn encode(&self, out: &mut [u8]);
}

/// Trait for pixels that can be projected through [`Rgba`].
///
/// This is the hub used by buffer conversion: any two `RgbaConvertible`
/// formats convert via an intermediate `Rgba` value.
pub trait RgbaConvertible {
    /// Projects this pixel to RGBA.
    fn to_rgba(&self) -> Rgba;

    /// Builds a pixel of this format from an RGBA value.
    fn from_rgba(rgba: Rgba) -> Self;
}

/// RGB pixel with 8-bit channels.
///
/// # Example
///
/// ```
/// use pixkit_core::Rgb;
///
/// let pixel = Rgb::new(255, 128, 64);
/// assert_eq!(pixel.red, 255);
/// assert_eq!(pixel.with_alpha(10).alpha, 10);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel value.
    pub red: u8,
    /// Green channel value.
    pub green: u8,
    /// Blue channel value.
    pub blue: u8,
}

impl Rgb {
    /// Create a new RGB pixel.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a grayscale pixel with equal RGB values.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    /// Create a black pixel.
    #[inline]
    pub const fn black() -> Self {
        Self::gray(0)
    }

    /// Create a white pixel.
    #[inline]
    pub const fn white() -> Self {
        Self::gray(u8::MAX)
    }

    /// Get RGB values as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Create an RGBA pixel from this one with the given alpha.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba::new(self.red, self.green, self.blue, alpha)
    }
}

impl PixelCodec for Rgb {
    const STRIDE: usize = 3;

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    fn encode(&self, out: &mut [u8]) {
        out[..Self::STRIDE].copy_from_slice(&self.to_array());
    }
}

impl RgbaConvertible for Rgb {
    #[inline]
    fn to_rgba(&self) -> Rgba {
        self.with_alpha(u8::MAX)
    }

    /// Drops alpha.
    #[inline]
    fn from_rgba(rgba: Rgba) -> Self {
        rgba.rgb()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl From<Rgba> for Rgb {
    #[inline]
    fn from(rgba: Rgba) -> Self {
        rgba.rgb()
    }
}

/// RGBA pixel with 8-bit channels.
///
/// Alpha is straight (not premultiplied).
///
/// # Example
///
/// ```
/// use pixkit_core::{Rgb, Rgba};
///
/// let pixel = Rgba::opaque(1, 2, 3);
/// assert_eq!(pixel.alpha, 255);
/// assert_eq!(pixel.rgb(), Rgb::new(1, 2, 3));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel value.
    pub red: u8,
    /// Green channel value.
    pub green: u8,
    /// Blue channel value.
    pub blue: u8,
    /// Alpha channel value.
    pub alpha: u8,
}

impl Rgba {
    /// Create a new RGBA pixel.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque pixel.
    #[inline]
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, u8::MAX)
    }

    /// Create a fully transparent black pixel.
    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Get RGB component (discarding alpha).
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.red, self.green, self.blue)
    }

    /// Get RGBA values as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Check if pixel is fully opaque.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.alpha == u8::MAX
    }
}

impl PixelCodec for Rgba {
    const STRIDE: usize = 4;

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    fn encode(&self, out: &mut [u8]) {
        out[..Self::STRIDE].copy_from_slice(&self.to_array());
    }
}

impl RgbaConvertible for Rgba {
    #[inline]
    fn to_rgba(&self) -> Rgba {
        *self
    }

    #[inline]
    fn from_rgba(rgba: Rgba) -> Self {
        rgba
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGBA({}, {}, {}, {})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

impl From<Rgb> for Rgba {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        rgb.to_rgba()
    }
}

/// HSV pixel with 64-bit float channels.
///
/// - `hue` in degrees, nominally `[0, 360)`
/// - `saturation` and `value` nominally in `[0, 1]`
///
/// Out-of-range values are accepted everywhere; conversion to RGB reduces
/// hue modulo 360 and clamps the resulting channels.
///
/// The byte encoding is three native-endian `f64`s and must not be
/// persisted or sent to another process.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsv {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation.
    pub saturation: f64,
    /// Value (brightness).
    pub value: f64,
}

impl Hsv {
    /// Create a new HSV pixel.
    #[inline]
    pub const fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Get HSV values as an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.hue, self.saturation, self.value]
    }
}

impl PixelCodec for Hsv {
    const STRIDE: usize = 3 * std::mem::size_of::<f64>();

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        Self::new(
            NativeEndian::read_f64(&bytes[0..8]),
            NativeEndian::read_f64(&bytes[8..16]),
            NativeEndian::read_f64(&bytes[16..24]),
        )
    }

    #[inline]
    fn encode(&self, out: &mut [u8]) {
        NativeEndian::write_f64_into(&self.to_array(), &mut out[..Self::STRIDE]);
    }
}

impl Hash for Hsv {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // -0.0 == 0.0, so both must feed the same bits.
        for v in self.to_array() {
            let bits = if v == 0.0 { 0 } else { v.to_bits() };
            bits.hash(state);
        }
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSV({}, {}, {})", self.hue, self.saturation, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<P: PixelCodec + PartialEq + fmt::Debug>(pixel: P) {
        let mut bytes = vec![0u8; P::STRIDE];
        pixel.encode(&mut bytes);
        assert_eq!(P::decode(&bytes), pixel);
    }

    #[test]
    fn test_strides() {
        assert_eq!(Rgb::STRIDE, 3);
        assert_eq!(Rgba::STRIDE, 4);
        assert_eq!(Hsv::STRIDE, 24);
    }

    #[test]
    fn test_codec_roundtrip() {
        roundtrip(Rgb::new(0, 127, 255));
        roundtrip(Rgba::new(1, 2, 3, 4));
        roundtrip(Rgba::transparent());
        roundtrip(Hsv::new(194.48275862068968, 0.3431952662721893, 0.6627450980392157));
        roundtrip(Hsv::new(-720.5, 3.0, f64::MAX));
    }

    #[test]
    fn test_encode_stays_in_stride() {
        let mut bytes = [0xAAu8; 6];
        Rgb::new(1, 2, 3).encode(&mut bytes[1..]);
        assert_eq!(bytes, [0xAA, 1, 2, 3, 0xAA, 0xAA]);
    }

    #[test]
    fn test_decode_any_bytes() {
        let bytes: Vec<u8> = (0..Hsv::STRIDE as u8).collect();
        let hsv = Hsv::decode(&bytes);
        let mut out = vec![0u8; Hsv::STRIDE];
        hsv.encode(&mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    fn test_rgb_rgba_projection() {
        let rgba = Rgba::new(10, 20, 30, 40);
        let rgb = Rgb::from_rgba(rgba);
        assert_eq!(rgb, Rgb::new(10, 20, 30));
        assert_eq!(rgb.to_rgba(), Rgba::new(10, 20, 30, 255));
        assert_eq!(Rgba::from(rgb), Rgba::opaque(10, 20, 30));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "RGB(1, 2, 3)");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "RGBA(1, 2, 3, 4)");
        assert_eq!(Hsv::new(0.0, 0.0, 1.0).to_string(), "HSV(0, 0, 1)");
    }

    #[test]
    fn test_hsv_hash_matches_eq() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(hsv: Hsv) -> u64 {
            let mut hasher = DefaultHasher::new();
            hsv.hash(&mut hasher);
            hasher.finish()
        }

        let a = Hsv::new(194.5, 0.25, 0.75);
        assert_eq!(hash_of(a), hash_of(Hsv::new(194.5, 0.25, 0.75)));
        assert_ne!(hash_of(a), hash_of(Hsv::new(194.5, 0.75, 0.25)));

        assert_eq!(Hsv::new(-0.0, 0.0, 0.0), Hsv::default());
        assert_eq!(hash_of(Hsv::new(-0.0, -0.0, 0.0)), hash_of(Hsv::default()));
    }
}
