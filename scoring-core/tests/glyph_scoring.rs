//! End-to-end scoring tests against a real font.
//!
//! These exercise the full pipeline (rasterize a glyph, re-encode it as
//! a "drawing", score it back against the same font) the way a caller
//! actually would. They need a real TrueType font checked in at
//! `test/DejaVuSans.ttf`, the same way the library this crate grew out
//! of keeps `test/LiberationMono-Regular.ttf` for its own fixtures.

use image::ImageEncoder;
use scoring_core::{render_reference, score};

const FONT_PATH: &str = "test/DejaVuSans.ttf";

fn test_font() -> Vec<u8> {
    std::fs::read(FONT_PATH).unwrap_or_else(|e| {
        panic!("missing font fixture at {FONT_PATH}: {e}; see DESIGN.md for how to supply one")
    })
}

#[test]
fn scoring_the_reference_against_itself_is_perfect() {
    let font = test_font();
    let reference_png = render_reference('A', &font, 128).unwrap();
    let result = score(&reference_png, 'A', &font).unwrap();

    assert_eq!(result.score, 100);
    assert_eq!(result.stars, 5);
    assert_eq!(result.feedback, "Amazing! Perfect!");
    assert_eq!(result.coverage, 100);
    assert_eq!(result.accuracy, 100);
    assert_eq!(result.similarity, 100);
}

#[test]
fn stray_ink_reduces_accuracy_but_not_coverage() {
    let font = test_font();
    let mut reference_png = render_reference('C', &font, 128).unwrap();

    // Decode, add 10 stray ink pixels far in a corner, re-encode.
    let img = image::load_from_memory(&reference_png).unwrap().to_luma8();
    let (w, h) = img.dimensions();
    let mut raw = img.into_raw();
    for i in 0..10 {
        let idx = (i * w as usize + i) as usize;
        if idx < raw.len() {
            raw[idx] = 0;
        }
    }
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(&raw, w, h, image::ColorType::L8)
        .unwrap();
    reference_png = buf;

    let clean = score(&render_reference('C', &font, 128).unwrap(), 'C', &font).unwrap();
    let stray = score(&reference_png, 'C', &font).unwrap();

    assert_eq!(stray.coverage, clean.coverage);
    assert!(stray.accuracy <= clean.accuracy);
    assert!(stray.score <= clean.score);
    assert!(clean.score - stray.score <= 20);
}

#[test]
fn single_dot_scores_low() {
    let font = test_font();
    let mut mask = scoring_core::BinaryImage::new(200, 200);
    for dy in 0..5 {
        for dx in 0..5 {
            mask.set(100 + dx, 100 + dy, true);
        }
    }
    let png = scoring_core::codec::encode(&mask);

    let result = score(&png, 'M', &font).unwrap();
    assert!(result.score <= 20);
    assert_eq!(result.stars, 1);
    assert_eq!(result.feedback, "Keep practicing!");
}

#[test]
fn translation_within_canvas_barely_moves_the_score() {
    let font = test_font();
    let reference_png = render_reference('D', &font, 128).unwrap();
    let baseline = score(&reference_png, 'D', &font).unwrap();

    // Re-place the same glyph ink translated by (20, 10) on a larger
    // canvas that still fully contains it.
    let glyph = image::load_from_memory(&reference_png).unwrap().to_luma8();
    let mut translated = image::GrayImage::from_pixel(256, 256, image::Luma([255u8]));
    for (x, y, px) in glyph.enumerate_pixels() {
        translated.put_pixel(x + 20, y + 10, *px);
    }
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            translated.as_raw(),
            translated.width(),
            translated.height(),
            image::ColorType::L8,
        )
        .unwrap();

    let moved = score(&buf, 'D', &font).unwrap();
    assert!((baseline.score as i32 - moved.score as i32).abs() <= 2);
    assert!(moved.score >= 98);
}

#[test]
fn scaling_within_canvas_barely_moves_the_score() {
    let font = test_font();
    let reference_png = render_reference('E', &font, 128).unwrap();

    let glyph = image::load_from_memory(&reference_png).unwrap().to_luma8();
    let scaled = image::imageops::resize(
        &glyph,
        (glyph.width() as f32 * 0.6) as u32,
        (glyph.height() as f32 * 0.6) as u32,
        image::imageops::FilterType::Nearest,
    );
    let mut canvas = image::GrayImage::from_pixel(256, 256, image::Luma([255u8]));
    image::imageops::overlay(&mut canvas, &scaled, 40, 40);

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            image::ColorType::L8,
        )
        .unwrap();

    let result = score(&buf, 'E', &font).unwrap();
    assert!(result.score >= 95);
}
