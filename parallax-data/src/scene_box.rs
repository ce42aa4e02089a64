//! Axis-aligned scene bounds.

use crate::error::DataError;
use glam::Vec3;

/// Axis-aligned box bounding the reconstructed volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl SceneBox {
    /// Cube `[-s, -s, -s]..[s, s, s]` centered at the origin.
    pub fn from_half_extent(s: f32) -> Result<Self, DataError> {
        if !s.is_finite() || s <= 0.0 {
            return Err(DataError::invalid(
                "aabb_scale",
                format!("{} is not a positive half extent", s),
            ));
        }
        Ok(Self {
            min: Vec3::splat(-s),
            max: Vec3::splat(s),
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Side lengths along x, y, z.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn diagonal_length(&self) -> f32 {
        self.extent().length()
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}
