//! Parsed dataset description handed to the reconstruction pipeline.

use crate::camera::Cameras;
use crate::depth::DepthMap;
use crate::scene_box::SceneBox;
use std::path::PathBuf;

/// Extra per-sample signals beyond the color image.
#[derive(Debug, Clone, Copy)]
pub struct SampleInputs<'a> {
    pub depth: &'a DepthMap,
}

/// Everything downstream needs to know about one capture.
///
/// `image_filenames`, `cameras.camera_to_worlds` and `depths` share one index:
/// entry `i` of each belongs to the `i`-th retained frame, in manifest order.
#[derive(Debug, Clone)]
pub struct DatasetDescription {
    pub image_filenames: Vec<PathBuf>,
    pub cameras: Cameras,
    pub scene_box: SceneBox,
    pub depths: Vec<DepthMap>,
}

impl DatasetDescription {
    pub fn len(&self) -> usize {
        self.image_filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_filenames.is_empty()
    }

    pub fn depth(&self, index: usize) -> Option<&DepthMap> {
        self.depths.get(index)
    }

    /// Named extra inputs for sample `index` (currently just `depth`).
    pub fn sample_inputs(&self, index: usize) -> Option<SampleInputs<'_>> {
        self.depth(index).map(|depth| SampleInputs { depth })
    }
}
