//! Camera model shared by every frame of a capture.

use glam::{Affine3A, Mat3, Vec3};

/// Camera-to-world transform with the homogeneous row dropped (3x4).
pub type CameraToWorld = Affine3A;

/// Projection model of a camera. Captures in this format are always pinhole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraType {
    #[default]
    Perspective,
}

/// Lens distortion coefficients (radial `k1..k4`, tangential `p1, p2`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistortionParams {
    pub k1: f32,
    pub k2: f32,
    pub k3: f32,
    pub k4: f32,
    pub p1: f32,
    pub p2: f32,
}

impl DistortionParams {
    /// Two radial and two tangential coefficients; higher radial terms are zero.
    pub fn new(k1: f32, k2: f32, p1: f32, p2: f32) -> Self {
        Self {
            k1,
            k2,
            k3: 0.0,
            k4: 0.0,
            p1,
            p2,
        }
    }

    /// Coefficients in `[k1, k2, k3, k4, p1, p2]` order.
    pub fn to_array(&self) -> [f32; 6] {
        [self.k1, self.k2, self.k3, self.k4, self.p1, self.p2]
    }

    pub fn is_identity(&self) -> bool {
        self.to_array().iter().all(|&c| c == 0.0)
    }
}

/// Build a [`CameraToWorld`] from a row-major 4x4 matrix, ignoring the last row.
pub fn camera_to_world_from_rows(m: &[[f64; 4]; 4]) -> CameraToWorld {
    let column = |j: usize| Vec3::new(m[0][j] as f32, m[1][j] as f32, m[2][j] as f32);
    Affine3A::from_mat3_translation(Mat3::from_cols(column(0), column(1), column(2)), column(3))
}

/// Rows of a [`CameraToWorld`] as a 3x4 row-major array.
pub fn camera_to_world_rows(transform: &CameraToWorld) -> [[f32; 4]; 3] {
    let t = transform.translation;
    let mut rows = [[0.0; 4]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        let r = transform.matrix3.row(i);
        *row = [r.x, r.y, r.z, t[i]];
    }
    rows
}

/// Intrinsics shared by all frames plus one pose per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Cameras {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
    pub height: u32,
    pub width: u32,
    pub distortion: DistortionParams,
    pub camera_type: CameraType,
    pub camera_to_worlds: Vec<CameraToWorld>,
}

impl Cameras {
    pub fn len(&self) -> usize {
        self.camera_to_worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camera_to_worlds.is_empty()
    }

    pub fn camera_to_world(&self, index: usize) -> Option<&CameraToWorld> {
        self.camera_to_worlds.get(index)
    }

    /// Pinhole intrinsics matrix `K`.
    pub fn intrinsics_matrix(&self) -> Mat3 {
        Mat3::from_cols(
            Vec3::new(self.fx, 0.0, 0.0),
            Vec3::new(0.0, self.fy, 0.0),
            Vec3::new(self.cx, self.cy, 1.0),
        )
    }
}
