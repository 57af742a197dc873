//! voxrot-transform - Rigid rotation resampling for 3D scalar volumes
//!
//! This crate rotates a dense 3D scalar volume about its center and
//! resamples it onto a destination grid with nearest-neighbor sampling:
//!
//! - Rotation matrices from explicit coefficients or Euler angles under
//!   the XYZ, YZX, YZY, and ZXZ axis-order conventions
//! - Gather (inverse, one write per destination voxel) and scatter
//!   (forward, last writer wins) mapping modes
//! - Output sizing from the rotated bounding box of the input extent
//!
//! The per-voxel computation is stateless; the gather loop runs in
//! parallel over destination z-slabs.

mod error;
pub mod matrix;
pub mod resample;

pub use error::{TransformError, TransformResult};
pub use matrix::{
    AxisOrder, RotationMatrix, RotationSpec, build_matrix, matrix_xyz, matrix_yzx, matrix_yzy,
    matrix_zxz,
};
pub use resample::{
    MappingMode, ResampleOptions, map_point, resample, resample_with_matrix, rotate_volume,
    rotated_dims,
};
