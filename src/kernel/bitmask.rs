//! Block-parallel suppressor built on per-chunk overlap bitmasks.
//!
//! Greedy NMS looks inherently sequential, but only the *application* of
//! suppression is order-dependent; whether two boxes overlap beyond the
//! threshold is symmetric and score-free. The kernel therefore computes every
//! pairwise overlap decision up front as an n x ceil(n/64) matrix of `u64`
//! bitmasks, fanning rows out across the rayon pool, and applies them in a
//! cheap strictly-sequential walk. The keep list is identical to
//! `sequential::suppress` index-for-index.

use rayon::prelude::*;

use crate::geometry::{BBox, Detection};
use crate::kernel::score_order;
use crate::trace::{trace_event, trace_span};

#[cfg(not(feature = "simd"))]
use crate::geometry::iou;
#[cfg(feature = "simd")]
use crate::kernel::simd::overlap_bits;

/// Boxes per bitmask chunk.
const BLOCK_BITS: usize = u64::BITS as usize;

/// Greedy NMS with the same contract and output as `sequential::suppress`.
pub fn suppress(detections: &[Detection], threshold: f32) -> Vec<usize> {
    let n = detections.len();
    if n == 0 {
        return Vec::new();
    }
    let _span = trace_span!("bitmask_suppress", boxes = n).entered();

    let order = score_order(detections);
    // Rank-ordered copies so mask row r always refers to the rank-r box.
    let ranked: Vec<BBox> = order.iter().map(|&i| detections[i].bbox).collect();

    let col_blocks = n.div_ceil(BLOCK_BITS);
    let mut masks = vec![0u64; n * col_blocks];
    masks
        .par_chunks_mut(col_blocks)
        .enumerate()
        .for_each(|(row, row_masks)| fill_row(&ranked, threshold, row, row_masks));

    // The application pass must stay sequential: the decision for rank r
    // depends on every earlier kept row.
    let mut removed = vec![0u64; col_blocks];
    let mut keep = Vec::new();
    for (rank, &index) in order.iter().enumerate() {
        let block = rank / BLOCK_BITS;
        let bit = rank % BLOCK_BITS;
        if removed[block] & (1u64 << bit) != 0 {
            continue;
        }
        keep.push(index);

        // Re-marking an already-removed box is idempotent, so the kept row is
        // OR-ed in without consulting current removal state.
        let row = &masks[rank * col_blocks..(rank + 1) * col_blocks];
        for (dst, src) in removed.iter_mut().zip(row.iter()).skip(block) {
            *dst |= *src;
        }
    }

    trace_event!("bitmask_kept", kept = keep.len(), boxes = n);
    keep
}

/// Fills one mask row: bit k of cell b marks rank `b * 64 + k` as overlapping
/// `ranked[row]` beyond the threshold. Cells left of the diagonal stay zero;
/// each parallel unit writes only its own row.
fn fill_row(ranked: &[BBox], threshold: f32, row: usize, row_masks: &mut [u64]) {
    let anchor = &ranked[row];
    let first_block = row / BLOCK_BITS;

    for (block, mask) in row_masks.iter_mut().enumerate().skip(first_block) {
        let start = block * BLOCK_BITS;
        let end = (start + BLOCK_BITS).min(ranked.len());
        let mut bits = overlap_bits(anchor, &ranked[start..end], threshold);

        if block == first_block {
            // Diagonal chunk: a box may only suppress later-ranked boxes.
            let shift = row - start + 1;
            bits = if shift == BLOCK_BITS {
                0
            } else {
                bits & (u64::MAX << shift)
            };
        }
        *mask = bits;
    }
}

/// Scalar overlap-bit assembly for one chunk.
#[cfg(not(feature = "simd"))]
fn overlap_bits(anchor: &BBox, chunk: &[BBox], threshold: f32) -> u64 {
    let mut bits = 0u64;
    for (k, other) in chunk.iter().enumerate() {
        if iou(anchor, other) > threshold {
            bits |= 1u64 << k;
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::suppress;
    use crate::geometry::{BBox, Detection};
    use crate::kernel::sequential;

    /// Deterministic clustered boxes spanning several bitmask chunks.
    fn make_detections(n: usize) -> Vec<Detection> {
        (0..n)
            .map(|i| {
                let cluster = (i % 13) as f32;
                let jitter = ((i * 7) % 5) as f32;
                let x1 = cluster * 30.0 + jitter;
                let y1 = ((i * 11) % 17) as f32 + cluster * 25.0;
                let size = 20.0 + ((i * 3) % 9) as f32;
                let score = (((i * 37) % 100) as f32) / 100.0;
                Detection::new(BBox::new(x1, y1, x1 + size, y1 + size), score)
            })
            .collect()
    }

    #[test]
    fn empty_input_keeps_nothing() {
        assert!(suppress(&[], 0.5).is_empty());
    }

    #[test]
    fn matches_sequential_within_one_chunk() {
        let dets = make_detections(40);
        for &threshold in &[0.0, 0.3, 0.5, 0.9] {
            assert_eq!(
                suppress(&dets, threshold),
                sequential::suppress(&dets, threshold),
            );
        }
    }

    #[test]
    fn matches_sequential_across_chunk_boundaries() {
        for n in [63, 64, 65, 130, 257] {
            let dets = make_detections(n);
            assert_eq!(suppress(&dets, 0.4), sequential::suppress(&dets, 0.4));
        }
    }

    #[test]
    fn matches_sequential_on_score_ties() {
        let mut dets = make_detections(90);
        for det in dets.iter_mut() {
            det.score = (det.score * 4.0).floor() / 4.0;
        }
        assert_eq!(suppress(&dets, 0.3), sequential::suppress(&dets, 0.3));
    }
}
