//! Disparity map loading from `.npy` files.

use crate::error::DataError;
use ndarray::{Array2, ArrayD, Axis, Ix2};
use ndarray_npy::{ReadNpyError, read_npy};
use std::path::Path;
use tracing::debug;

/// Per-pixel disparity (or depth) for one frame, indexed `[row, col]`.
pub type DepthMap = Array2<f32>;

/// Load a `[N, M, H, W]` array and keep the `[0, 0]` slice.
///
/// Both `f4` and `f8` arrays are accepted; `f8` is narrowed to `f32`.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_depth_map(path: &Path) -> Result<DepthMap, DataError> {
    let array = read_f32_array(path)?;

    let shape = array.shape().to_vec();
    if shape.len() != 4 || shape[0] == 0 || shape[1] == 0 {
        return Err(DataError::DepthShape {
            path: path.to_path_buf(),
            shape,
        });
    }

    let slice = array
        .index_axis_move(Axis(0), 0)
        .index_axis_move(Axis(0), 0)
        .into_dimensionality::<Ix2>()
        .map_err(|_| DataError::DepthShape {
            path: path.to_path_buf(),
            shape: shape.clone(),
        })?;

    debug!("Loaded depth map {}x{}", slice.ncols(), slice.nrows());
    Ok(slice)
}

fn read_f32_array(path: &Path) -> Result<ArrayD<f32>, DataError> {
    match read_npy::<_, ArrayD<f32>>(path) {
        Ok(array) => Ok(array),
        Err(ReadNpyError::WrongDescriptor(_)) => {
            let wide: ArrayD<f64> = read_npy(path).map_err(npy_error)?;
            Ok(wide.mapv(|v| v as f32))
        }
        Err(e) => Err(npy_error(e)),
    }
}

// File system failures surface as plain I/O errors.
fn npy_error(err: ReadNpyError) -> DataError {
    match err {
        ReadNpyError::Io(e) => DataError::Io(e),
        other => DataError::Npy(other),
    }
}
