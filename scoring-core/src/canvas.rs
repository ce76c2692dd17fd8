/*!
Shared "fit ink into the canonical canvas" routine.

Both the glyph rasterizer and the drawing preprocessor need to take some
ink confined to a bounding box, rescale it to fit within
[`crate::CANVAS_SIZE`] minus [`crate::CANVAS_MARGIN`] pixels on a side, and
center it on an all-background square canvas. The two contracts must
match exactly, pixel for pixel, or the drawn and reference masks won't be
directly comparable — so there's exactly one implementation of it.
*/

use crate::{BinaryImage, CANVAS_MARGIN, CANVAS_SIZE};

/// Rescale the ink inside `src`'s bounding box so that its larger
/// dimension is exactly `CANVAS_SIZE - CANVAS_MARGIN`, then place it
/// centered on a new `CANVAS_SIZE`-square canvas.
///
/// The rescale is unconditional: ink smaller than the budget is enlarged,
/// not just shrunk, so every normalized mask occupies the same extent
/// regardless of how large the source ink was. Resampling is
/// nearest-neighbor, since the source is a binary mask and any smoothing
/// would reintroduce gray values this pipeline has already committed to
/// discarding.
pub fn fit_and_center(src: &BinaryImage) -> Option<BinaryImage> {
    let bbox = src.ink_bounding_box()?;
    let ink_w = bbox.width();
    let ink_h = bbox.height();

    let max_dim = ink_w.max(ink_h) as f32;
    let budget = (CANVAS_SIZE - CANVAS_MARGIN) as f32;
    let scale = budget / max_dim;

    let new_w = ((ink_w as f32 * scale).round() as usize).max(1);
    let new_h = ((ink_h as f32 * scale).round() as usize).max(1);

    let mut canvas = BinaryImage::new(CANVAS_SIZE, CANVAS_SIZE);
    let x_off = (CANVAS_SIZE - new_w) / 2;
    let y_off = (CANVAS_SIZE - new_h) / 2;

    for ty in 0..new_h {
        // Nearest-neighbor: map each destination row/column back to the
        // source ink box by simple proportional indexing.
        let src_y = bbox.y0 + ((ty as f32 + 0.5) / scale) as usize;
        let src_y = src_y.min(bbox.y1);
        for tx in 0..new_w {
            let src_x = bbox.x0 + ((tx as f32 + 0.5) / scale) as usize;
            let src_x = src_x.min(bbox.x1);
            if src.is_ink(src_x, src_y) {
                canvas.set(x_off + tx, y_off + ty, true);
            }
        }
    }

    Some(canvas)
}
