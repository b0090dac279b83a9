//! Reference greedy suppressor, single-threaded.
//!
//! This is the semantics baseline: the block-parallel suppressor is required
//! to reproduce its output index-for-index.

use crate::geometry::{iou, Detection};
use crate::kernel::score_order;
use crate::trace::{trace_event, trace_span};

/// Greedy NMS over `detections`, keeping the highest-scored box of every
/// group of mutually overlapping candidates.
///
/// Returns input indices of kept boxes in descending-score order. Two boxes
/// conflict when their IoU strictly exceeds `threshold`: `threshold = 1.0`
/// suppresses nothing (even exact duplicates sit at IoU 1.0, never above it)
/// and `threshold = 0.0` keeps only pairwise-disjoint boxes.
pub fn suppress(detections: &[Detection], threshold: f32) -> Vec<usize> {
    let _span = trace_span!("sequential_suppress", boxes = detections.len()).entered();

    let order = score_order(detections);
    let mut suppressed = vec![false; order.len()];
    let mut keep = Vec::new();

    for pos in 0..order.len() {
        if suppressed[pos] {
            continue;
        }
        let index = order[pos];
        keep.push(index);

        let anchor = &detections[index].bbox;
        for (later, slot) in suppressed.iter_mut().enumerate().skip(pos + 1) {
            if *slot {
                continue;
            }
            if iou(anchor, &detections[order[later]].bbox) > threshold {
                *slot = true;
            }
        }
    }

    trace_event!("sequential_kept", kept = keep.len(), boxes = detections.len());
    keep
}
