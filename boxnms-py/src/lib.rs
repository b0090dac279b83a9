//! Python bindings for the boxnms suppression library.
//!
//! Exposes the single suppression entry point over a NumPy `(n, 5)` array,
//! matching the shape produced by detector post-processing pipelines.

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ::boxnms::{Detection, ROW_WIDTH};

/// Greedy non-maximum suppression.
///
/// Args:
///     dets: float32 array of shape (n, 5) with x1, y1, x2, y2, score rows.
///     thresh: IoU threshold in [0, 1]; overlap strictly above it suppresses.
///     force_cpu: Run the sequential suppressor even when the parallel
///         backend is compiled in (default: False).
///
/// Returns:
///     Indices of kept rows, ordered by descending score.
#[pyfunction]
#[pyo3(signature = (dets, thresh, force_cpu = false))]
fn nms(dets: PyReadonlyArray2<'_, f32>, thresh: f32, force_cpu: bool) -> PyResult<Vec<usize>> {
    let columns = dets.shape()[1];
    if columns != ROW_WIDTH {
        return Err(PyValueError::new_err(format!(
            "detections must have {ROW_WIDTH} columns, got {columns}"
        )));
    }

    let array = dets.as_array();
    let detections: Vec<Detection> = array
        .outer_iter()
        .map(|row| Detection::from_row([row[0], row[1], row[2], row[3], row[4]]))
        .collect();
    Ok(::boxnms::nms(&detections, thresh, force_cpu))
}

/// Reports whether this build carries the block-parallel backend.
#[pyfunction]
fn parallel_available() -> bool {
    ::boxnms::parallel_available()
}

#[pymodule]
fn boxnms(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(nms, m)?)?;
    m.add_function(wrap_pyfunction!(parallel_available, m)?)?;
    Ok(())
}
