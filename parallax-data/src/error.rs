//! Error types for dataset parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a manifest into a dataset description.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(
        "No image files found ({skipped} skipped). \
         You should check the file_paths in the transforms.json file to make sure they are correct."
    )]
    DatasetEmpty { skipped: usize },

    #[error("Missing required manifest field: {0}")]
    MissingField(String),

    #[error("Invalid manifest field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Focal length cannot be calculated from transforms.json (missing fields).")]
    FocalLengthUnavailable,

    #[error("Depth map {path} has shape {shape:?}, expected [N, M, H, W] with N, M >= 1")]
    DepthShape { path: PathBuf, shape: Vec<usize> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Npy(#[from] ndarray_npy::ReadNpyError),
}

impl DataError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DataError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
