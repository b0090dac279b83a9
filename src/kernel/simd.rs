//! SIMD overlap-bit assembly using the `wide` crate.
//!
//! Vectorizes the IoU arithmetic of the bitmask kernel 8 lanes at a time
//! with `f32x8`, plus a scalar remainder loop. Lane operations are IEEE-754
//! single-precision ops applied in the same order as the scalar metric, so
//! the overlap decisions stay bit-identical to `geometry::iou`.

use crate::geometry::{iou, BBox, PIXEL_EXTENT};
use wide::f32x8;

const LANES: usize = 8;

/// Gathers one field of 8 consecutive boxes into lanes.
#[inline]
fn gather(boxes: &[BBox], field: impl Fn(&BBox) -> f32) -> f32x8 {
    f32x8::from([
        field(&boxes[0]),
        field(&boxes[1]),
        field(&boxes[2]),
        field(&boxes[3]),
        field(&boxes[4]),
        field(&boxes[5]),
        field(&boxes[6]),
        field(&boxes[7]),
    ])
}

/// Overlap bits of `anchor` against one chunk: bit k is set when
/// `iou(anchor, chunk[k]) > threshold`.
pub(crate) fn overlap_bits(anchor: &BBox, chunk: &[BBox], threshold: f32) -> u64 {
    let mut bits = 0u64;

    let ax1 = f32x8::splat(anchor.x1);
    let ay1 = f32x8::splat(anchor.y1);
    let ax2 = f32x8::splat(anchor.x2);
    let ay2 = f32x8::splat(anchor.y2);
    let area_a = f32x8::splat(anchor.area());
    let extent = f32x8::splat(PIXEL_EXTENT);
    let zero = f32x8::ZERO;

    let simd_end = chunk.len() / LANES * LANES;
    let mut k = 0;
    while k < simd_end {
        let lanes = &chunk[k..k + LANES];
        let bx1 = gather(lanes, |b| b.x1);
        let by1 = gather(lanes, |b| b.y1);
        let bx2 = gather(lanes, |b| b.x2);
        let by2 = gather(lanes, |b| b.y2);
        let area_b = gather(lanes, BBox::area);

        let iw = (ax2.min(bx2) - ax1.max(bx1) + extent).max(zero);
        let ih = (ay2.min(by2) - ay1.max(by1) + extent).max(zero);
        let inter = iw * ih;
        let union = area_a + area_b - inter;
        let scores = (inter / union).to_array();
        let unions = union.to_array();

        for (lane, (&u, &score)) in unions.iter().zip(scores.iter()).enumerate() {
            // A non-positive union scores 0.0 in the scalar metric.
            if u > 0.0 && score > threshold {
                bits |= 1u64 << (k + lane);
            }
        }
        k += LANES;
    }

    // Scalar remainder
    while k < chunk.len() {
        if iou(anchor, &chunk[k]) > threshold {
            bits |= 1u64 << k;
        }
        k += 1;
    }

    bits
}
