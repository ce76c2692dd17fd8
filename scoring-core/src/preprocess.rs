/*!
Turn a decoded grayscale drawing into a normalized [`BinaryImage`] on the
canonical canvas.

Binarization uses a fixed luminance threshold rather than anything
adaptive (Otsu and friends), since an adaptive threshold would silently
shift every score a caller has already seen.
*/

use crate::codec::GrayImage;
use crate::{canvas, BinaryImage, Error};

/// A pixel is ink if its luminance is strictly below this value.
/// Chosen to accept pencil-like strokes on a near-white canvas while
/// rejecting antialiasing halos.
pub const INK_THRESHOLD: u8 = 200;

/// Binarize, find the ink, and normalize it onto the canonical canvas.
///
/// Fails with [`Error::EmptyDrawing`] if the image has no pixels below
/// [`INK_THRESHOLD`].
pub fn preprocess(gray: &GrayImage) -> Result<BinaryImage, Error> {
    let mut binary = BinaryImage::new(gray.width(), gray.height());
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            if gray.get(x, y) < INK_THRESHOLD {
                binary.set(x, y, true);
            }
        }
    }

    canvas::fit_and_center(&binary).ok_or(Error::EmptyDrawing)
}
