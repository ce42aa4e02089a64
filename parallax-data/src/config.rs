//! Parser configuration.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Settings for [`ManifestDataParser`](crate::ManifestDataParser).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Directory holding the manifest, images and disparity maps.
    pub data: PathBuf,
    /// How much to scale the camera origins by. Not applied by this format.
    pub scale_factor: f32,
    /// How much to scale the scene (pose translations).
    pub scene_scale: f32,
    /// Manifest file name inside `data`.
    pub manifest_name: String,
    /// Open each retained image to read its header dimensions.
    pub probe_images: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/ours/posterv2"),
            scale_factor: 1.0,
            scene_scale: 0.33,
            manifest_name: "transforms.json".to_string(),
            probe_images: true,
        }
    }
}

impl ParserConfig {
    /// Load a (possibly partial) JSON config; missing keys keep their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn with_data(mut self, data: impl Into<PathBuf>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_scene_scale(mut self, scene_scale: f32) -> Self {
        self.scene_scale = scene_scale;
        self
    }

    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    pub fn with_probe_images(mut self, probe: bool) -> Self {
        self.probe_images = probe;
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.data.join(&self.manifest_name)
    }
}
