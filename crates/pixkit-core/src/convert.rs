//! Pixel format conversion.
//!
//! Buffers convert between any two [`RgbaConvertible`] formats by projecting
//! each pixel through [`Rgba`]. Converting to a format with fewer channels
//! is lossy: `Rgba -> Rgb -> Rgba` always comes back fully opaque.
//!
//! ```rust
//! use pixkit_core::{PixelBuffer, Rgb, Rgba};
//!
//! let rgba = PixelBuffer::filled(2, 2, Rgba::new(10, 20, 30, 40));
//! let rgb: PixelBuffer<Rgb> = rgba.convert();
//! assert_eq!(rgb.pixel(0, 0), Rgb::new(10, 20, 30));
//!
//! let back: PixelBuffer<Rgba> = rgb.convert();
//! assert_eq!(back.pixel(1, 1), Rgba::new(10, 20, 30, 255));
//! ```
//!
//! # HSV
//!
//! [`rgb_to_hsv`] and [`hsv_to_rgb`] implement the six-sector hexcone model
//! on 8-bit RGB. Achromatic colors (black, white, exact grays) map to hue 0
//! and saturation 0, so hue does not survive an `Hsv -> Rgb -> Hsv` trip when
//! saturation is 0.

use crate::{Hsv, PixelBuffer, PixelCodec, Rgb, Rgba, RgbaConvertible};
use std::any::TypeId;
use tracing::trace;

impl<P: PixelCodec + RgbaConvertible> PixelBuffer<P> {
    /// Converts this buffer to pixel format `Q`, leaving `self` untouched.
    ///
    /// Same-format conversion is a plain byte copy.
    pub fn convert<Q: PixelCodec + RgbaConvertible>(&self) -> PixelBuffer<Q> {
        if TypeId::of::<P>() == TypeId::of::<Q>() {
            trace!(pixel = std::any::type_name::<P>(), "same-format conversion, copying bytes");
            return PixelBuffer::from_parts(self.width(), self.height(), self.as_bytes().to_vec());
        }
        project(self)
    }

    /// Converts this buffer to pixel format `Q`, reusing the allocation when
    /// `Q` is the same format.
    pub fn into_format<Q: PixelCodec + RgbaConvertible>(self) -> PixelBuffer<Q> {
        if TypeId::of::<P>() == TypeId::of::<Q>() {
            trace!(pixel = std::any::type_name::<P>(), "same-format conversion, reusing buffer");
            let (width, height) = self.dimensions();
            return PixelBuffer::from_parts(width, height, self.into_bytes());
        }
        project(&self)
    }
}

/// Converts `image` to pixel format `Q`.
///
/// Free-function form of [`PixelBuffer::convert`].
#[inline]
pub fn convert<P, Q>(image: &PixelBuffer<P>) -> PixelBuffer<Q>
where
    P: PixelCodec + RgbaConvertible,
    Q: PixelCodec + RgbaConvertible,
{
    image.convert()
}

fn project<P, Q>(image: &PixelBuffer<P>) -> PixelBuffer<Q>
where
    P: PixelCodec + RgbaConvertible,
    Q: PixelCodec + RgbaConvertible,
{
    let mut bytes = vec![0u8; image.pixel_count() * Q::STRIDE];
    for (src, dst) in image
        .as_bytes()
        .chunks_exact(P::STRIDE)
        .zip(bytes.chunks_exact_mut(Q::STRIDE))
    {
        Q::from_rgba(P::decode(src).to_rgba()).encode(dst);
    }
    PixelBuffer::from_parts(image.width(), image.height(), bytes)
}

/// Converts an 8-bit RGB color to HSV.
///
/// Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use pixkit_core::{rgb_to_hsv, Hsv, Rgb};
///
/// assert_eq!(rgb_to_hsv(Rgb::white()), Hsv::new(0.0, 0.0, 1.0));
/// ```
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let max_channel = f64::from(u8::MAX);
    let red = f64::from(rgb.red) / max_channel;
    let green = f64::from(rgb.green) / max_channel;
    let blue = f64::from(rgb.blue) / max_channel;

    let min = red.min(green).min(blue);
    let max = red.max(green).max(blue);
    let delta = max - min;

    // Black, white and exact grays have no hue.
    if max == 0.0 || min == 1.0 || delta == 0.0 {
        return Hsv::new(0.0, 0.0, max);
    }

    let saturation = delta / max;
    let sector = if red == max {
        (green - blue) / delta
    } else if green == max {
        2.0 + (blue - red) / delta
    } else {
        4.0 + (red - green) / delta
    };

    let mut hue = sector * 60.0;
    if hue < 0.0 {
        hue += 360.0;
    }
    Hsv::new(hue, saturation, max)
}

/// Converts an HSV color to 8-bit RGB.
///
/// Hue is reduced modulo 360 (negative hues wrap). Each channel is scaled by
/// 255, truncated toward zero, then clamped to `0..=255`.
///
/// Because of the truncation an RGB -> HSV -> RGB trip can lose one step in
/// a channel, and repeated trips can keep drifting.
///
/// # Example
///
/// ```rust
/// use pixkit_core::{hsv_to_rgb, Hsv, Rgb};
///
/// assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
/// assert_eq!(hsv_to_rgb(Hsv::new(480.0, 1.0, 1.0)), Rgb::new(0, 255, 0));
/// ```
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let Hsv {
        hue,
        saturation,
        value,
    } = hsv;

    let mut hue = hue.rem_euclid(360.0);
    // rem_euclid rounds tiny negative hues up to exactly 360.
    if hue >= 360.0 {
        hue = 0.0;
    }
    let scaled = hue / 60.0;
    let sector = scaled.floor();
    let fraction = scaled - sector;

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * fraction);
    let t = value * (1.0 - saturation * (1.0 - fraction));

    let (red, green, blue) = match sector as i64 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        5 => (value, p, q),
        other => unreachable!("hue sector {other} outside 0..6 for hue {hue}"),
    };

    Rgb::new(to_channel(red), to_channel(green), to_channel(blue))
}

/// Scales a unit value to a byte by truncation, then clamps.
#[inline]
fn to_channel(v: f64) -> u8 {
    ((v * 255.0) as i64).clamp(0, i64::from(u8::MAX)) as u8
}

impl RgbaConvertible for Hsv {
    /// Projects to opaque RGBA.
    #[inline]
    fn to_rgba(&self) -> Rgba {
        hsv_to_rgb(*self).with_alpha(u8::MAX)
    }

    /// Ignores alpha.
    #[inline]
    fn from_rgba(rgba: Rgba) -> Self {
        rgb_to_hsv(rgba.rgb())
    }
}
