/*!
Compare a normalized, renormalized drawn mask against a reference mask
and produce the final quality metrics.

Three metrics are blended into one score:

  - **coverage**: how much of the reference ink the drawing covers.
  - **accuracy**: how much of the drawn ink stays on the reference.
  - **similarity**: a 50/50 blend of IoU and Chamfer closeness, which
    rewards ink that lands *near* the reference even when it doesn't
    exactly overlap it.
*/

use crate::{stars_and_feedback, BinaryImage, DistanceField, ScoreResult, CANVAS_SIZE};

/// Chamfer closeness normalization constant: ink farther than this from
/// the reference contributes nothing to the closeness term.
const CHAMFER_TAU: f32 = CANVAS_SIZE as f32 / 8.0;

/// The three intermediate metrics, each in `[0.0, 1.0]`, before they're
/// weighted into a final score.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub coverage: f32,
    pub accuracy: f32,
    pub similarity: f32,
}

fn intersection_count(a: &BinaryImage, b: &BinaryImage) -> usize {
    a.data()
        .iter()
        .zip(b.data().iter())
        .filter(|(&x, &y)| x != 0 && y != 0)
        .count()
}

fn union_count(a: &BinaryImage, b: &BinaryImage) -> usize {
    a.data()
        .iter()
        .zip(b.data().iter())
        .filter(|(&x, &y)| x != 0 || y != 0)
        .count()
}

/// coverage = |D ∩ R| / |R|
pub fn coverage(drawn: &BinaryImage, reference: &BinaryImage) -> f32 {
    let ref_count = reference.ink_count();
    if ref_count == 0 {
        return 0.0;
    }
    let intersection = intersection_count(drawn, reference);
    (intersection as f32 / ref_count as f32).clamp(0.0, 1.0)
}

/// accuracy = |D ∩ R| / |D|
pub fn accuracy(drawn: &BinaryImage, reference: &BinaryImage) -> f32 {
    let drawn_count = drawn.ink_count();
    if drawn_count == 0 {
        return 0.0;
    }
    let intersection = intersection_count(drawn, reference);
    (intersection as f32 / drawn_count as f32).clamp(0.0, 1.0)
}

/// IoU = |D ∩ R| / |D ∪ R|
fn iou(drawn: &BinaryImage, reference: &BinaryImage) -> f32 {
    let union = union_count(drawn, reference);
    if union == 0 {
        return 0.0;
    }
    let intersection = intersection_count(drawn, reference);
    intersection as f32 / union as f32
}

/// chamfer_closeness = 1 - min(1, mean_{p in D} DF_R[p] / tau)
fn chamfer_closeness(drawn: &BinaryImage, reference_distance: &DistanceField) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for y in 0..drawn.height() {
        for x in 0..drawn.width() {
            if drawn.is_ink(x, y) {
                sum += reference_distance.get(x, y);
                count += 1;
            }
        }
    }
    if count == 0 {
        return 0.0;
    }
    let mean_dist = sum / count as f32;
    1.0 - (mean_dist / CHAMFER_TAU).min(1.0)
}

/// similarity = 0.5 * IoU + 0.5 * chamfer_closeness
pub fn similarity(drawn: &BinaryImage, reference: &BinaryImage, reference_distance: &DistanceField) -> f32 {
    let iou = iou(drawn, reference);
    let closeness = chamfer_closeness(drawn, reference_distance);
    (0.5 * iou + 0.5 * closeness).clamp(0.0, 1.0)
}

/// Compute all three metrics for an already-normalized, already-
/// renormalized pair of masks, plus the reference's distance field.
pub fn compute_metrics(
    drawn: &BinaryImage,
    reference: &BinaryImage,
    reference_distance: &DistanceField,
) -> Metrics {
    Metrics {
        coverage: coverage(drawn, reference),
        accuracy: accuracy(drawn, reference),
        similarity: similarity(drawn, reference, reference_distance),
    }
}

/// Combine the three metrics into the final 0-100 score, star rating,
/// and feedback label.
///
/// `raw = 100 * (0.35 * coverage + 0.35 * accuracy + 0.30 * similarity)`,
/// rounded to the nearest integer; forced to 0 if the drawing has no
/// ink at all.
pub fn finalize(metrics: Metrics, drawn_ink_count: usize, reference_image: Vec<u8>) -> ScoreResult {
    let score = if drawn_ink_count == 0 {
        0u8
    } else {
        let raw = 100.0 * (0.35 * metrics.coverage + 0.35 * metrics.accuracy + 0.30 * metrics.similarity);
        raw.round().clamp(0.0, 100.0) as u8
    };
    let (stars, feedback) = stars_and_feedback(score);

    ScoreResult {
        score,
        stars,
        feedback,
        coverage: (metrics.coverage * 100.0).round().clamp(0.0, 100.0) as u8,
        accuracy: (metrics.accuracy * 100.0).round().clamp(0.0, 100.0) as u8,
        similarity: (metrics.similarity * 100.0).round().clamp(0.0, 100.0) as u8,
        reference_image,
    }
}
