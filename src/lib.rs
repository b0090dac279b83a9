//! BoxNMS is a greedy non-maximum suppression library for axis-aligned
//! detection boxes.
//!
//! This crate provides a sequential reference suppressor and an optional
//! block-parallel bitmask suppressor (`rayon` feature, with `simd` layering
//! `wide`-vectorized overlap tests on top). Both produce identical keep
//! lists; the dispatcher picks a backend from the build's capability and a
//! `force_cpu` override, never failing for a missing backend.

mod dispatch;
pub mod geometry;
pub mod kernel;
pub(crate) mod trace;
pub mod util;

pub use dispatch::{nms, parallel_available, select_backend, Backend};
pub use geometry::{detections_from_rows, iou, validate_detections, BBox, Detection, ROW_WIDTH};
pub use util::{NmsError, NmsResult};
