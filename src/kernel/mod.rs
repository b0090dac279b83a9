//! Suppression kernel implementations.

use crate::geometry::Detection;

pub mod sequential;

#[cfg(feature = "rayon")]
pub mod bitmask;

#[cfg(feature = "simd")]
pub(crate) mod simd;

/// Permutation of input indices sorted by descending score, ties broken by
/// ascending input index.
///
/// This is the one total order both suppressors walk; keeping it here rather
/// than in each kernel is what makes their outputs comparable at all.
pub(crate) fn score_order(detections: &[Detection]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| {
        detections[b]
            .score
            .total_cmp(&detections[a].score)
            .then_with(|| a.cmp(&b))
    });
    order
}

#[cfg(test)]
mod tests {
    use super::score_order;
    use crate::geometry::{BBox, Detection};

    fn det(score: f32) -> Detection {
        Detection::new(BBox::new(0.0, 0.0, 1.0, 1.0), score)
    }

    #[test]
    fn orders_by_descending_score() {
        let dets = [det(0.1), det(0.9), det(0.5)];
        assert_eq!(score_order(&dets), vec![1, 2, 0]);
    }

    #[test]
    fn ties_resolve_to_earlier_index() {
        let dets = [det(0.5), det(0.9), det(0.5)];
        assert_eq!(score_order(&dets), vec![1, 0, 2]);
    }

    #[test]
    fn empty_input_yields_empty_order() {
        assert!(score_order(&[]).is_empty());
    }
}
