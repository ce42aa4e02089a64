//! Manifest to dataset transformation.

use crate::camera::{CameraType, Cameras, DistortionParams, camera_to_world_from_rows};
use crate::config::ParserConfig;
use crate::dataset::DatasetDescription;
use crate::depth::load_depth_map;
use crate::error::DataError;
use crate::focal::get_focal_lengths;
use crate::manifest::{Manifest, depth_path_for};
use crate::scene_box::SceneBox;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Dataset split requested by the caller. This format does not partition
/// frames, so the split only shows up in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Split {
    #[default]
    Train,
    Val,
    Test,
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "val" => Ok(Split::Val),
            "test" => Ok(Split::Test),
            other => Err(format!("unknown split '{}' (expected train, val or test)", other)),
        }
    }
}

/// Parser for instant-ngp style captures with per-frame disparity maps.
#[derive(Debug, Clone, Default)]
pub struct ManifestDataParser {
    config: ParserConfig,
}

impl ManifestDataParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Load the manifest from the configured directory and parse it.
    pub fn parse(&self, split: Split) -> Result<DatasetDescription, DataError> {
        let manifest = Manifest::from_path(self.config.manifest_path())?;
        self.parse_manifest(&manifest, split)
    }

    /// Parse an already loaded manifest. Relative paths resolve against `config.data`.
    #[tracing::instrument(skip_all, fields(root = %self.config.data.display(), split = %split))]
    pub fn parse_manifest(
        &self,
        manifest: &Manifest,
        split: Split,
    ) -> Result<DatasetDescription, DataError> {
        let root = self.config.data.as_path();
        let declared_size = declared_image_size(manifest);

        let mut image_filenames = Vec::with_capacity(manifest.frames.len());
        let mut camera_to_worlds = Vec::with_capacity(manifest.frames.len());
        let mut depths = Vec::with_capacity(manifest.frames.len());
        let mut num_skipped = 0usize;

        for frame in &manifest.frames {
            if frame.file_path.is_empty() {
                num_skipped += 1;
                continue;
            }

            let image_path = root.join(&frame.file_path);
            let depth = load_depth_map(&root.join(depth_path_for(&frame.file_path)))?;

            if self.config.probe_images {
                probe_image(&image_path, declared_size)?;
            }

            camera_to_worlds.push(camera_to_world_from_rows(&frame.transform_matrix));
            depths.push(depth);
            image_filenames.push(image_path);
        }

        info!("Skipping {} files in dataset split {}.", num_skipped, split);

        if image_filenames.is_empty() {
            return Err(DataError::DatasetEmpty {
                skipped: num_skipped,
            });
        }

        for pose in &mut camera_to_worlds {
            pose.translation *= self.config.scene_scale;
        }

        let distortion = DistortionParams::new(
            manifest.number("k1")? as f32,
            manifest.number("k2")? as f32,
            manifest.number("p1")? as f32,
            manifest.number("p2")? as f32,
        );

        // assumes the scene is centered at the origin
        let scene_box = SceneBox::from_half_extent(manifest.number("aabb_scale")? as f32)?;

        let (fl_x, fl_y) = get_focal_lengths(manifest)?;

        let cameras = Cameras {
            fx: fl_x as f32,
            fy: fl_y as f32,
            cx: manifest.number("cx")? as f32,
            cy: manifest.number("cy")? as f32,
            height: manifest.dimension("h")?,
            width: manifest.dimension("w")?,
            distortion,
            camera_type: CameraType::Perspective,
            camera_to_worlds,
        };

        debug!(
            "Parsed {} frames: fx={:.3} fy={:.3} {}x{}",
            cameras.len(),
            cameras.fx,
            cameras.fy,
            cameras.width,
            cameras.height
        );

        Ok(DatasetDescription {
            image_filenames,
            cameras,
            scene_box,
            depths,
        })
    }
}

fn declared_image_size(manifest: &Manifest) -> Option<(u32, u32)> {
    let w = manifest.dimension("w").ok()?;
    let h = manifest.dimension("h").ok()?;
    Some((w, h))
}

/// Read the image header. The manifest dimensions stay authoritative; a
/// disagreement is only reported.
fn probe_image(path: &Path, declared: Option<(u32, u32)>) -> Result<(), DataError> {
    let (width, height) = image::image_dimensions(path).map_err(|e| match e {
        image::ImageError::IoError(io) => DataError::Io(io),
        other => DataError::Image(other),
    })?;

    if let Some((w, h)) = declared {
        if (w, h) != (width, height) {
            warn!(
                "Image {} is {}x{} but the manifest declares {}x{}",
                path.display(),
                width,
                height,
                w,
                h
            );
        }
    }
    Ok(())
}
