//! Parallax Data Crate
//!
//! Turns a single-scene multi-view capture (a `transforms.json` manifest, color
//! images and precomputed monocular disparity maps) into a [`DatasetDescription`]
//! that a reconstruction pipeline can consume directly.
//!
//! ## Modules
//!
//! - [`manifest`]: JSON manifest model and field access
//! - [`focal`]: focal length derivation from equivalent intrinsics fields
//! - [`camera`]: shared camera intrinsics, distortion and per-frame poses
//! - [`scene_box`]: axis-aligned scene bounds
//! - [`depth`]: `.npy` disparity map loading
//! - [`parser`]: the manifest to dataset transformation
//! - [`dataset`]: the parsed [`DatasetDescription`] and per-sample depth lookup
//! - [`config`]: parser settings ([`ParserConfig`])
//! - [`error`]: the [`DataError`] type shared by all loaders

pub mod camera;
pub mod config;
pub mod dataset;
pub mod depth;
pub mod error;
pub mod focal;
pub mod manifest;
pub mod parser;
pub mod scene_box;

pub use camera::{CameraToWorld, CameraType, Cameras, DistortionParams};
pub use config::ParserConfig;
pub use dataset::{DatasetDescription, SampleInputs};
pub use depth::{DepthMap, load_depth_map};
pub use error::DataError;
pub use focal::{FocalRule, get_focal_lengths};
pub use manifest::{FrameRecord, Manifest, depth_path_for};
pub use parser::{ManifestDataParser, Split};
pub use scene_box::SceneBox;
