/*!
Render a font glyph into a binary mask on the canonical canvas.

Built on [`ab_glyph`], the same font-handling crate used upstream to turn
glyph outlines into pixel coverage: there, coverage sums feed a
brightness-to-character lookup; here, thresholded coverage is placed on
a canvas directly.

The margin and centering behavior here must match [`crate::preprocess`]
exactly, or a drawn mask and a reference mask won't land in the same
place for comparison. Both route through [`crate::canvas::fit_and_center`]
for that reason.
*/

use ab_glyph::{Font, FontRef, GlyphId, OutlinedGlyph, ScaleFont};

use crate::{canvas, BinaryImage, Error};

/// Coverage at or above this fraction of full (255) intensity counts as
/// ink when rasterizing outline coverage.
const INK_COVERAGE_THRESHOLD: f32 = 128.0 / 255.0;

/// Rasterize `character` from `font_bytes` into a [`BinaryImage`] of
/// `n` by `n` pixels, with the glyph's ink fit and centered per
/// [`canvas::fit_and_center`].
pub fn rasterize(font_bytes: &[u8], character: char, n: usize) -> Result<BinaryImage, Error> {
    let font = FontRef::try_from_slice(font_bytes).map_err(|_| Error::InvalidFont)?;

    if font.glyph_id(character) == GlyphId(0) {
        return Err(Error::UnknownCharacter);
    }

    let px_height = 0.8 * n as f32;
    let scaled_font = font.as_scaled(px_height);

    let glyph = scaled_font.scaled_glyph(character);
    let outline = scaled_font.outline_glyph(glyph).ok_or(Error::EmptyGlyph)?;

    let raw = rasterize_outline_coverage(&outline);
    let bbox = raw.ink_bounding_box().ok_or(Error::EmptyGlyph)?;
    let cropped = crop(&raw, bbox);

    canvas::fit_and_center(&cropped).ok_or(Error::EmptyGlyph)
}

/// Draw the glyph's outline coverage into a binary raster exactly large
/// enough to contain its ink-plus-bearings bounding box.
fn rasterize_outline_coverage(outline: &OutlinedGlyph) -> BinaryImage {
    let bounds = outline.px_bounds();
    let w = (bounds.width().ceil() as usize).max(1);
    let h = (bounds.height().ceil() as usize).max(1);

    let mut raster = BinaryImage::new(w, h);
    outline.draw(|x, y, coverage| {
        if coverage >= INK_COVERAGE_THRESHOLD {
            raster.set(x as usize, y as usize, true);
        }
    });
    raster
}

fn crop(src: &BinaryImage, bbox: crate::BoundingBox) -> BinaryImage {
    let w = bbox.width();
    let h = bbox.height();
    let mut out = BinaryImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if src.is_ink(bbox.x0 + x, bbox.y0 + y) {
                out.set(x, y, true);
            }
        }
    }
    out
}
