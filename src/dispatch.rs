//! Backend selection between the sequential and block-parallel suppressors.
//!
//! Whether the parallel backend exists is a build-time property (the `rayon`
//! cargo feature), surfaced as an explicit capability query instead of being
//! probed at call time. A build without the backend silently runs the
//! sequential suppressor; the caller never sees an error for it.

use crate::geometry::Detection;
use crate::kernel::sequential;

#[cfg(feature = "rayon")]
use crate::kernel::bitmask;

/// Suppression backend chosen by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Single-threaded reference suppressor.
    Sequential,
    /// Block-parallel bitmask suppressor.
    Parallel,
}

/// Reports whether this build carries the block-parallel backend.
pub fn parallel_available() -> bool {
    cfg!(feature = "rayon")
}

/// Backend the dispatcher will run for the given `force_cpu` flag.
pub fn select_backend(force_cpu: bool) -> Backend {
    if force_cpu || !parallel_available() {
        Backend::Sequential
    } else {
        Backend::Parallel
    }
}

/// Greedy non-maximum suppression over `detections`.
///
/// Returns input indices of kept boxes, ordered by descending score with
/// ties broken by ascending input index. `threshold` is the IoU in `[0, 1]`
/// beyond which two boxes are redundant; the comparison is strict. With
/// `force_cpu` the sequential suppressor always runs; otherwise the parallel
/// suppressor runs when the build carries it. Both backends produce the
/// same keep list, so the choice is never observable in the result.
pub fn nms(detections: &[Detection], threshold: f32, force_cpu: bool) -> Vec<usize> {
    match select_backend(force_cpu) {
        // select_backend never yields Parallel in builds without the backend.
        #[cfg(feature = "rayon")]
        Backend::Parallel => bitmask::suppress(detections, threshold),
        _ => sequential::suppress(detections, threshold),
    }
}
