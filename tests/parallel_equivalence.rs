#![cfg(feature = "rayon")]

use boxnms::kernel::{bitmask, sequential};
use boxnms::{nms, BBox, Detection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Clustered random boxes so a realistic share of pairs overlaps.
fn random_detections(rng: &mut StdRng, n: usize, clusters: usize) -> Vec<Detection> {
    (0..n)
        .map(|_| {
            let cluster = rng.random_range(0..clusters.max(1)) as f32;
            let x1 = cluster * 40.0 + rng.random_range(-8.0f32..8.0);
            let y1 = cluster * 25.0 + rng.random_range(-8.0f32..8.0);
            let w = rng.random_range(5.0f32..30.0);
            let h = rng.random_range(5.0f32..30.0);
            let score = rng.random_range(0.0f32..1.0);
            Detection::new(BBox::new(x1, y1, x1 + w, y1 + h), score)
        })
        .collect()
}

#[test]
fn parallel_matches_sequential_on_random_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for &n in &[0usize, 1, 2, 10, 63, 64, 65, 200, 513] {
        for &threshold in &[0.0f32, 0.1, 0.3, 0.5, 0.7, 0.99, 1.0] {
            let dets = random_detections(&mut rng, n, 6);
            assert_eq!(
                bitmask::suppress(&dets, threshold),
                sequential::suppress(&dets, threshold),
                "keep lists diverged for n={n} threshold={threshold}",
            );
        }
    }
}

#[test]
fn parallel_matches_sequential_with_ties_and_duplicates() {
    let mut rng = StdRng::seed_from_u64(41);
    let mut dets = random_detections(&mut rng, 160, 4);
    // Quantize scores to force ties and duplicate a slice of boxes verbatim,
    // so the ascending-index tie-break actually decides outcomes.
    for det in dets.iter_mut() {
        det.score = (det.score * 8.0).floor() / 8.0;
    }
    let dup: Vec<Detection> = dets[..40].to_vec();
    dets.extend(dup);

    for &threshold in &[0.0f32, 0.4, 0.8, 1.0] {
        assert_eq!(
            bitmask::suppress(&dets, threshold),
            sequential::suppress(&dets, threshold),
            "keep lists diverged at threshold={threshold}",
        );
    }
}

#[test]
fn dispatcher_output_is_independent_of_backend() {
    let mut rng = StdRng::seed_from_u64(7);
    let dets = random_detections(&mut rng, 300, 8);
    assert_eq!(nms(&dets, 0.5, false), nms(&dets, 0.5, true));
}
