/*!
The two public entry points: [`score`] and [`render_reference`].

Neither function contains algorithmic logic of its own; both just
sequence the pipeline stages in [`crate::codec`], [`crate::rasterize`],
[`crate::preprocess`], [`crate::morphology`], and [`crate::scorer`].
*/

use crate::{codec, morphology, preprocess, rasterize, scorer, Error, ScoreResult, CANVAS_SIZE};

/// Minimum accepted output size for [`render_reference`].
pub const MIN_RENDER_SIZE: u32 = 8;
/// Maximum accepted output size for [`render_reference`].
pub const MAX_RENDER_SIZE: u32 = 4096;

/// Score a drawing against the glyph a given font renders for
/// `character`.
///
/// `image_png` is the PNG-encoded drawing; `font_bytes` is a raw
/// TrueType or OpenType font. On success, the returned
/// [`ScoreResult::reference_image`] is a PNG of the reference glyph as
/// [`crate::rasterize`] rendered it — the raw outline, not the
/// thinned-and-re-thickened mask scoring compares against.
pub fn score(image_png: &[u8], character: char, font_bytes: &[u8]) -> Result<ScoreResult, Error> {
    let drawn_gray = codec::decode(image_png)?;
    let drawn_raw = preprocess::preprocess(&drawn_gray)?;
    let reference_raw = rasterize::rasterize(font_bytes, character, CANVAS_SIZE)?;

    let drawn = morphology::thin_and_renormalize(&drawn_raw);
    let reference = morphology::thin_and_renormalize(&reference_raw);
    let reference_distance = morphology::distance_transform(&reference);

    let metrics = scorer::compute_metrics(&drawn, &reference, &reference_distance);
    let reference_png = codec::encode(&reference_raw);

    Ok(scorer::finalize(metrics, drawn.ink_count(), reference_png))
}

/// Render the glyph a font draws for `character`, alone, as a PNG of
/// `size` by `size` pixels.
///
/// Internally rasterizes at the pipeline's canonical size, then
/// resamples with nearest-neighbor to `size` — no thinning or
/// renormalization is applied, since this is for display, not scoring.
pub fn render_reference(character: char, font_bytes: &[u8], size: u32) -> Result<Vec<u8>, Error> {
    if size < MIN_RENDER_SIZE || size > MAX_RENDER_SIZE {
        return Err(Error::InvalidSize);
    }

    let glyph = rasterize::rasterize(font_bytes, character, CANVAS_SIZE)?;
    let resized = resize_nearest_neighbor(&glyph, size as usize);
    Ok(codec::encode(&resized))
}

fn resize_nearest_neighbor(src: &crate::BinaryImage, size: usize) -> crate::BinaryImage {
    let mut out = crate::BinaryImage::new(size, size);
    let scale_x = src.width() as f32 / size as f32;
    let scale_y = src.height() as f32 / size as f32;
    for y in 0..size {
        let src_y = ((y as f32 + 0.5) * scale_y) as usize;
        let src_y = src_y.min(src.height() - 1);
        for x in 0..size {
            let src_x = ((x as f32 + 0.5) * scale_x) as usize;
            let src_x = src_x.min(src.width() - 1);
            if src.is_ink(src_x, src_y) {
                out.set(x, y, true);
            }
        }
    }
    out
}
