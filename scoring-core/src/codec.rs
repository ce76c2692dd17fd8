/*!
PNG decoding and encoding.

Decoding interprets any of grayscale, grayscale+alpha, RGB, or RGBA PNG
input as 8-bit luminance, compositing any alpha channel over white first
(so a fully transparent pixel reads as background, not black). Encoding
always produces single-channel 8-bit grayscale with ink pixels at 0 and
background at 255.
*/

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder};

use crate::{BinaryImage, Error};

/// Maximum accepted width or height, in pixels, for a decoded image.
pub const MAX_DIMENSION: u32 = 4096;

/// 8-bit grayscale image, row-major, produced by [`decode`].
#[derive(Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Decode PNG bytes into an 8-bit grayscale buffer.
///
/// Fails with [`Error::InvalidImage`] when the bytes aren't a decodable
/// PNG, or when either dimension exceeds [`MAX_DIMENSION`].
pub fn decode(png_bytes: &[u8]) -> Result<GrayImage, Error> {
    let img = image::load_from_memory_with_format(png_bytes, image::ImageFormat::Png)
        .map_err(|_| Error::InvalidImage)?;

    if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        return Err(Error::InvalidImage);
    }

    Ok(to_luma_over_white(&img))
}

/// Composite alpha over white, then reduce to luminance with the
/// standard Rec. 601 coefficients (0.299R + 0.587G + 0.114B).
fn to_luma_over_white(img: &DynamicImage) -> GrayImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = vec![0u8; (width * height) as usize];

    for (i, px) in rgba.pixels().enumerate() {
        let [r, g, b, a] = px.0;
        let alpha = a as f32 / 255.0;
        let composite = |channel: u8| -> f32 { channel as f32 * alpha + 255.0 * (1.0 - alpha) };
        let r = composite(r);
        let g = composite(g);
        let b = composite(b);
        let luma = 0.299 * r + 0.587 * g + 0.114 * b;
        data[i] = luma.round().clamp(0.0, 255.0) as u8;
    }

    GrayImage {
        width: width as usize,
        height: height as usize,
        data,
    }
}

/// Encode a binary mask as an 8-bit single-channel PNG: ink (1) becomes
/// 0 (black), background (0) becomes 255 (white).
pub fn encode(mask: &BinaryImage) -> Vec<u8> {
    let mut out = Vec::new();
    let gray: Vec<u8> = mask
        .data()
        .iter()
        .map(|&v| if v != 0 { 0u8 } else { 255u8 })
        .collect();

    // Encoding a well-formed in-memory buffer to PNG doesn't fail in
    // practice; if it ever does, that's a bug in this module, not a
    // reportable runtime condition.
    PngEncoder::new(&mut out)
        .write_image(
            &gray,
            mask.width() as u32,
            mask.height() as u32,
            image::ColorType::L8,
        )
        .expect("encoding a binary mask to PNG should never fail");

    out
}
