//! Focal length derivation.
//!
//! Each axis is resolved independently from an ordered table of
//! `(field, rule)` pairs. The first field present in the manifest wins.

use crate::error::DataError;
use crate::manifest::Manifest;

/// How a manifest field is turned into a focal length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocalRule {
    /// The field already holds the focal length.
    Direct,
    /// The field is a field of view in degrees.
    FovDegrees,
    /// The field is a field of view in radians.
    FovRadians,
}

impl FocalRule {
    fn needs_resolution(self) -> bool {
        !matches!(self, FocalRule::Direct)
    }

    fn apply(self, value: f64, resolution: f64) -> f64 {
        match self {
            FocalRule::Direct => value,
            FocalRule::FovDegrees => fov_to_focal_length(value.to_radians(), resolution),
            FocalRule::FovRadians => fov_to_focal_length(value, resolution),
        }
    }
}

/// Field names used to resolve one image axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisFields {
    /// Image size along this axis, used by the field-of-view rules.
    pub resolution: &'static str,
    /// Candidate fields in priority order.
    pub rules: [(&'static str, FocalRule); 3],
}

pub const X_AXIS: AxisFields = AxisFields {
    resolution: "w",
    rules: [
        ("fl_x", FocalRule::Direct),
        ("x_fov", FocalRule::FovDegrees),
        ("camera_angle_x", FocalRule::FovRadians),
    ],
};

pub const Y_AXIS: AxisFields = AxisFields {
    resolution: "h",
    rules: [
        ("fl_y", FocalRule::Direct),
        ("y_fov", FocalRule::FovDegrees),
        ("camera_angle_y", FocalRule::FovRadians),
    ],
};

/// Pinhole focal length for a field of view spanning `resolution` pixels.
pub fn fov_to_focal_length(fov_radians: f64, resolution: f64) -> f64 {
    0.5 * resolution / (0.5 * fov_radians).tan()
}

/// Resolve one axis. Returns `0.0` when none of the candidate fields is present.
pub fn resolve_axis(manifest: &Manifest, axis: &AxisFields) -> Result<f64, DataError> {
    for &(field, rule) in &axis.rules {
        let Some(value) = manifest.optional_number(field)? else {
            continue;
        };
        let resolution = if rule.needs_resolution() {
            manifest.number(axis.resolution)?
        } else {
            0.0
        };
        return Ok(rule.apply(value, resolution));
    }
    Ok(0.0)
}

/// Read or compute `(fx, fy)` from the manifest.
///
/// Fails with [`DataError::FocalLengthUnavailable`] if either axis resolves to zero.
pub fn get_focal_lengths(manifest: &Manifest) -> Result<(f64, f64), DataError> {
    let fl_x = resolve_axis(manifest, &X_AXIS)?;
    let fl_y = resolve_axis(manifest, &Y_AXIS)?;

    if fl_x == 0.0 || fl_y == 0.0 {
        return Err(DataError::FocalLengthUnavailable);
    }

    Ok((fl_x, fl_y))
}
