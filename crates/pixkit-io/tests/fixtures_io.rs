use std::path::PathBuf;

use pixkit_core::{Hsv, PixelBuffer, Rgb, Rgba};
use pixkit_io::{encode, load, load_as, load_with_extension, ImageFormat, IoError};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).expect("read fixture")
}

#[test]
fn sniff_png_fixture() {
    let bytes = fixture("rgba_10x10.png");
    assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::Png));
}

#[test]
fn load_png_fixture_as_rgba() {
    let image: PixelBuffer<Rgba> = load(&fixture("rgba_10x10.png")).expect("load png");
    assert_eq!(image.dimensions(), (10, 10));
    assert_eq!(image.pixel(0, 0), Rgba::new(0, 0, 100, 255));
    assert_eq!(image.pixel(9, 9), Rgba::new(180, 180, 100, 174));
    assert_eq!(image.pixel(2, 7), Rgba::new(40, 140, 100, 241));
}

#[test]
fn load_png_fixture_as_rgb_drops_alpha() {
    let image: PixelBuffer<Rgb> = load(&fixture("rgba_10x10.png")).expect("load png");
    assert_eq!(image.dimensions(), (10, 10));
    assert_eq!(image.pixel(0, 0), Rgb::new(0, 0, 100));
    assert_eq!(image.pixel(9, 9), Rgb::new(180, 180, 100));
    assert_eq!(image.as_bytes().len(), 10 * 10 * 3);
}

#[test]
fn load_png_fixture_as_hsv() {
    let image: PixelBuffer<Hsv> = load(&fixture("rgba_10x10.png")).expect("load png");
    let px = image.pixel(0, 0);
    assert_eq!(px.hue, 240.0);
    assert_eq!(px.saturation, 1.0);
    approx::assert_relative_eq!(px.value, 100.0 / 255.0, epsilon = 1e-12);
}

#[test]
fn load_by_extension() {
    let bytes = fixture("rgba_10x10.png");
    let image: PixelBuffer<Rgba> = load_with_extension(&bytes, "png").expect("load png");
    assert_eq!(image.dimensions(), (10, 10));

    let err = load_with_extension::<Rgba>(&bytes, "tga").unwrap_err();
    assert!(matches!(err, IoError::UnknownFileExtension(ref ext) if ext == "tga"));
}

#[test]
fn palette_with_transparency_expands() {
    let image: PixelBuffer<Rgba> = load(&fixture("palette_4x1.png")).expect("load png");
    assert_eq!(
        image.pixels(),
        vec![
            Rgba::new(255, 0, 0, 255),
            Rgba::new(0, 255, 0, 255),
            Rgba::new(0, 0, 255, 255),
            Rgba::new(255, 255, 255, 0),
        ]
    );
}

#[test]
fn sixteen_bit_gray_is_stripped() {
    let image: PixelBuffer<Rgb> = load(&fixture("gray16_2x2.png")).expect("load png");
    assert_eq!(image.pixel(0, 0), Rgb::gray(0x12));
    assert_eq!(image.pixel(0, 1), Rgb::gray(0xFF));
    assert_eq!(image.pixel(1, 0), Rgb::gray(0x00));
    assert_eq!(image.pixel(1, 1), Rgb::gray(0x80));
}

#[test]
fn png_fixture_reencodes_identically() {
    let original: PixelBuffer<Rgba> = load(&fixture("rgba_10x10.png")).expect("load png");
    let bytes = encode(&original, ImageFormat::Png).expect("encode png");
    let reloaded: PixelBuffer<Rgba> = load(&bytes).expect("reload png");
    assert_eq!(reloaded, original);
}

#[test]
fn fixture_to_jpeg_keeps_dimensions() {
    let original: PixelBuffer<Rgb> = load(&fixture("rgba_10x10.png")).expect("load png");
    let bytes = encode(&original, ImageFormat::Jpeg).expect("encode jpeg");
    assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::Jpeg));

    let reloaded: PixelBuffer<Rgb> = load(&bytes).expect("reload jpeg");
    assert_eq!(reloaded.dimensions(), (10, 10));
}

#[test]
fn fixture_to_webp_keeps_alpha() {
    let original: PixelBuffer<Rgba> = load(&fixture("rgba_10x10.png")).expect("load png");
    let bytes = encode(&original, ImageFormat::WebP).expect("encode webp");
    assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::WebP));

    let reloaded: PixelBuffer<Rgba> = load(&bytes).expect("reload webp");
    assert_eq!(reloaded.dimensions(), (10, 10));
    assert_eq!(reloaded.pixel(0, 0).alpha, 255);
    assert!(reloaded.pixel(9, 9).alpha < 200);
}

#[test]
fn truncated_fixture_fails_without_partial_result() {
    let bytes = fixture("rgba_10x10.png");
    let result = load::<Rgba>(&bytes[..40]);
    assert!(matches!(result, Err(IoError::PngDecode(_))));
}

#[test]
fn forced_format_overrides_detection() {
    let bytes = fixture("rgba_10x10.png");
    let err = load_as::<Rgba>(&bytes, ImageFormat::WebP).unwrap_err();
    assert!(matches!(err, IoError::WebP(_)));
}
