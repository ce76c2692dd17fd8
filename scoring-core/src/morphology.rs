/*!
Skeletonization, line-width renormalization, and Euclidean distance
transforms.

Three operations live here, always run in this order on a normalized
ink mask:

  1. [`thin`] reduces ink to a one-pixel-wide skeleton (Zhang-Suen).
  2. [`renormalize`] re-thickens that skeleton to a fixed line diameter,
     so pen-width differences between a child's drawing and a font's
     stroke weight don't dominate the comparison.
  3. [`distance_transform`] computes the exact 2-D Euclidean distance
     from every pixel to the nearest ink pixel, used by the scorer's
     Chamfer metric.

The Zhang-Suen parallel condition must be evaluated against the
*pre-subiteration* neighborhood, with deletions applied in bulk only
after every candidate has been checked. Deleting pixels as they're found
breaks the algorithm's parallel semantics and produces lopsided
skeletons — that's a correctness bug, not a style choice.
*/

use crate::{BinaryImage, DistanceField};

/// Thin a binary mask to its one-pixel-wide skeleton with Zhang-Suen
/// parallel thinning. Preserves connectivity and endpoints. The
/// outermost ring of pixels is never deleted.
pub fn thin(src: &BinaryImage) -> BinaryImage {
    let w = src.width();
    let h = src.height();
    let mut data: Vec<bool> = src.data().iter().map(|&v| v != 0).collect();

    if w < 3 || h < 3 {
        return to_binary_image(&data, w, h);
    }

    loop {
        let deleted1 = thin_subiteration(&mut data, w, h, 1);
        let deleted2 = thin_subiteration(&mut data, w, h, 2);
        if !deleted1 && !deleted2 {
            break;
        }
    }

    to_binary_image(&data, w, h)
}

fn to_binary_image(data: &[bool], w: usize, h: usize) -> BinaryImage {
    let mut out = BinaryImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            if data[y * w + x] {
                out.set(x, y, true);
            }
        }
    }
    out
}

/// Run one Zhang-Suen subiteration (1 or 2) over `data` in place.
/// Returns whether any pixel was deleted.
fn thin_subiteration(data: &mut Vec<bool>, w: usize, h: usize, sub: u8) -> bool {
    let mut to_delete: Vec<usize> = Vec::new();

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            if !data[idx] {
                continue;
            }

            let n = data[(y - 1) * w + x];
            let ne = data[(y - 1) * w + x + 1];
            let e = data[y * w + x + 1];
            let se = data[(y + 1) * w + x + 1];
            let s = data[(y + 1) * w + x];
            let sw = data[(y + 1) * w + x - 1];
            let wst = data[y * w + x - 1];
            let nw = data[(y - 1) * w + x - 1];

            let ring = [n, ne, e, se, s, sw, wst, nw];
            let b = ring.iter().filter(|&&v| v).count();
            if !(2..=6).contains(&b) {
                continue;
            }

            let mut a = 0u32;
            for i in 0..8 {
                if !ring[i] && ring[(i + 1) % 8] {
                    a += 1;
                }
            }
            if a != 1 {
                continue;
            }

            let cond = if sub == 1 {
                !(n && e && s) && !(e && s && wst)
            } else {
                !(n && e && wst) && !(n && s && wst)
            };

            if cond {
                to_delete.push(idx);
            }
        }
    }

    let deleted = !to_delete.is_empty();
    for idx in to_delete {
        data[idx] = false;
    }
    deleted
}

/// Re-thicken a skeleton to `diameter` pixels by stamping a filled disk
/// of radius `diameter / 2` at every skeleton pixel.
pub fn renormalize(skeleton: &BinaryImage, diameter: usize) -> BinaryImage {
    let w = skeleton.width();
    let h = skeleton.height();
    let radius = (diameter / 2) as isize;
    let mut out = BinaryImage::new(w, h);

    for y in 0..h {
        for x in 0..w {
            if !skeleton.is_ink(x, y) {
                continue;
            }
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h {
                        out.set(nx as usize, ny as usize, true);
                    }
                }
            }
        }
    }

    out
}

/// Thin, then re-thicken to a fixed diameter of 4 pixels: the shared
/// normalization both the drawn and reference masks go through before
/// being scored against one another.
pub fn thin_and_renormalize(src: &BinaryImage) -> BinaryImage {
    const LINE_DIAMETER: usize = 4;
    renormalize(&thin(src), LINE_DIAMETER)
}

/// Exact 2-D unsigned Euclidean distance transform, via the separable
/// two-pass squared-distance algorithm of Felzenszwalb and Huttenlocher.
/// Ink pixels hold distance 0.
pub fn distance_transform(mask: &BinaryImage) -> DistanceField {
    let w = mask.width();
    let h = mask.height();
    const INF: f32 = 1e20;

    // Pass 1: down each column, squared distance to the nearest ink
    // pixel in that column alone.
    let mut column_pass = vec![0f32; w * h];
    let mut buf = vec![0f32; h];
    for x in 0..w {
        for y in 0..h {
            buf[y] = if mask.is_ink(x, y) { 0.0 } else { INF };
        }
        let d = distance_transform_1d(&buf);
        for y in 0..h {
            column_pass[y * w + x] = d[y];
        }
    }

    // Pass 2: along each row of the column pass's squared distances,
    // producing the full 2-D squared distance.
    let mut data = vec![0f32; w * h];
    let mut row_buf = vec![0f32; w];
    for y in 0..h {
        row_buf.copy_from_slice(&column_pass[y * w..(y + 1) * w]);
        let d = distance_transform_1d(&row_buf);
        for x in 0..w {
            data[y * w + x] = d[x].sqrt();
        }
    }

    DistanceField::new(w, h, data)
}

/// 1-D squared Euclidean distance transform of `f`, Felzenszwalb and
/// Huttenlocher's lower-envelope-of-parabolas construction. `f[i]` is
/// the input cost at `i` (0 for an ink pixel, a large sentinel
/// otherwise); the result is the squared distance to the nearest zero.
fn distance_transform_1d(f: &[f32]) -> Vec<f32> {
    let n = f.len();
    let mut d = vec![0f32; n];
    let mut v = vec![0i64; n];
    let mut z = vec![0f32; n + 1];
    let mut k: i64 = 0;

    v[0] = 0;
    z[0] = f32::NEG_INFINITY;
    z[1] = f32::INFINITY;

    for q in 1..n as i64 {
        let mut s = intersection(f, q, v[k as usize]);
        while s <= z[k as usize] {
            k -= 1;
            s = intersection(f, q, v[k as usize]);
        }
        k += 1;
        v[k as usize] = q;
        z[k as usize] = s;
        z[(k + 1) as usize] = f32::INFINITY;
    }

    k = 0;
    for q in 0..n as i64 {
        while z[(k + 1) as usize] < q as f32 {
            k += 1;
        }
        let vk = v[k as usize];
        d[q as usize] = ((q - vk) * (q - vk)) as f32 + f[vk as usize];
    }

    d
}

/// x-coordinate where the parabolas rooted at `q` and `v` intersect.
fn intersection(f: &[f32], q: i64, v: i64) -> f32 {
    ((f[q as usize] + (q * q) as f32) - (f[v as usize] + (v * v) as f32))
        / (2.0 * (q - v) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(w: usize, h: usize, cx: usize, cy: usize, r: usize) -> BinaryImage {
        let mut img = BinaryImage::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let dx = x as isize - cx as isize;
                let dy = y as isize - cy as isize;
                if (dx * dx + dy * dy) as usize <= r * r {
                    img.set(x, y, true);
                }
            }
        }
        img
    }

    fn brute_force_distance(mask: &BinaryImage, x: usize, y: usize) -> f32 {
        let mut best = f32::INFINITY;
        for iy in 0..mask.height() {
            for ix in 0..mask.width() {
                if mask.is_ink(ix, iy) {
                    let dx = ix as f32 - x as f32;
                    let dy = iy as f32 - y as f32;
                    let d = (dx * dx + dy * dy).sqrt();
                    if d < best {
                        best = d;
                    }
                }
            }
        }
        if best.is_infinite() {
            0.0
        } else {
            best
        }
    }

    #[test]
    fn distance_transform_matches_brute_force() {
        // P3, on a small grid (brute force over 128x128 is too slow for
        // a unit test, but the algorithm is size-independent).
        let mask = disk(32, 32, 10, 12, 3);
        let field = distance_transform(&mask);
        for y in 0..32 {
            for x in 0..32 {
                let expected = brute_force_distance(&mask, x, y);
                let got = field.get(x, y);
                assert!(
                    (got - expected).abs() < 1e-4,
                    "pixel ({x},{y}): got {got}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn ink_pixels_have_zero_distance() {
        let mask = disk(20, 20, 10, 10, 4);
        let field = distance_transform(&mask);
        for y in 0..20 {
            for x in 0..20 {
                if mask.is_ink(x, y) {
                    assert_eq!(field.get(x, y), 0.0);
                }
            }
        }
    }

    #[test]
    fn thinning_reduces_a_thick_bar_to_one_pixel_wide() {
        let mut img = BinaryImage::new(20, 20);
        for y in 8..12 {
            for x in 2..18 {
                img.set(x, y, true);
            }
        }
        let skeleton = thin(&img);
        for x in 3..17 {
            let width_at_x = (0..20).filter(|&y| skeleton.is_ink(x, y)).count();
            assert!(width_at_x <= 1, "column {x} has width {width_at_x}");
        }
        assert!(skeleton.ink_count() > 0);
    }

    #[test]
    fn renormalize_thickens_back_up() {
        let mut skeleton = BinaryImage::new(20, 20);
        for x in 2..18 {
            skeleton.set(x, 10, true);
        }
        let out = renormalize(&skeleton, 4);
        // P2: every ink pixel lies within radius 2 of some skeleton
        // pixel, and some column reaches the full diameter.
        let width_at_x = (0..20).filter(|&y| out.is_ink(10, y)).count();
        assert!(width_at_x >= 3 && width_at_x <= 5);
    }

    #[test]
    fn empty_mask_thins_and_renormalizes_to_empty() {
        let img = BinaryImage::new(16, 16);
        let out = thin_and_renormalize(&img);
        assert_eq!(out.ink_count(), 0);
    }
}
