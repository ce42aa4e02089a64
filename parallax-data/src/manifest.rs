//! `transforms.json` manifest model.
//!
//! Frames are deserialized into typed records. The scalar camera fields are
//! kept as a name -> value map because several of them are optional and the
//! focal length can come from any of a few equivalent keys.

use crate::error::DataError;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Suffix that replaces the 4-character image extension to locate the disparity map.
pub const DEPTH_SUFFIX: &str = "_disp.npy";

/// One capture sample as listed in the manifest.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FrameRecord {
    /// Image path relative to the capture root. Empty when the entry is malformed.
    #[serde(default)]
    pub file_path: String,
    /// Row-major 4x4 camera-to-world transform.
    pub transform_matrix: [[f64; 4]; 4],
}

/// A loaded capture manifest.
#[derive(Deserialize, Debug, Clone)]
pub struct Manifest {
    pub frames: Vec<FrameRecord>,
    #[serde(flatten)]
    fields: HashMap<String, JsonValue>,
}

impl Manifest {
    /// Read and deserialize a manifest from disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path.as_ref())?;
        let manifest: Manifest = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Manifest parsed: {} frames, {} scalar fields",
            manifest.frames.len(),
            manifest.fields.len()
        );
        Ok(manifest)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: JsonValue) -> Result<Self, DataError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Whether a scalar field is present (even if it is not numeric).
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Numeric field that must be present.
    pub fn number(&self, key: &str) -> Result<f64, DataError> {
        self.optional_number(key)?
            .ok_or_else(|| DataError::MissingField(key.to_string()))
    }

    /// Numeric field that may be absent. Present but non-numeric values are an error.
    pub fn optional_number(&self, key: &str) -> Result<Option<f64>, DataError> {
        match self.fields.get(key) {
            None => Ok(None),
            Some(JsonValue::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| DataError::invalid(key, "not representable as f64")),
            Some(other) => Err(DataError::invalid(
                key,
                format!("expected a number, found {}", other),
            )),
        }
    }

    /// Numeric field truncated to an integer pixel count.
    pub fn dimension(&self, key: &str) -> Result<u32, DataError> {
        let value = self.number(key)?;
        if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
            return Err(DataError::invalid(key, format!("{} is not a valid pixel size", value)));
        }
        Ok(value as u32)
    }
}

/// Disparity map path for an image path: the last 4 characters (the extension)
/// are replaced with [`DEPTH_SUFFIX`].
///
/// Paths shorter than 4 characters yield the bare suffix.
pub fn depth_path_for(file_path: &str) -> String {
    let cut = file_path
        .char_indices()
        .rev()
        .nth(3)
        .map_or(0, |(i, _)| i);
    format!("{}{}", &file_path[..cut], DEPTH_SUFFIX)
}
