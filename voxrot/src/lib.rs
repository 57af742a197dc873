//! Voxrot - Rigid rotation resampling of 3D scalar volumes
//!
//! Rotates a dense scalar volume (a tomographic or microscopy image
//! stack) about its center and resamples it with nearest-neighbor
//! sampling onto a destination grid.
//!
//! # Overview
//!
//! - [`Volume`] holds the samples as a flat `f32` buffer with x the
//!   fastest-varying axis
//! - [`transform::RotationSpec`] describes the rotation as an explicit
//!   matrix or as Euler angles under the XYZ, YZX, YZY, or ZXZ
//!   convention
//! - [`transform::resample`] fills a caller-owned destination;
//!   [`transform::rotate_volume`] allocates one sized to the rotated
//!   bounding box
//!
//! # Example
//!
//! ```
//! use voxrot::{Dims3, Volume};
//! use voxrot::transform::{AxisOrder, ResampleOptions, RotationSpec, rotate_volume};
//!
//! let src = Volume::new(Dims3::new(32, 32, 16)).unwrap();
//! let spec = RotationSpec::Euler {
//!     angles: [0.0, 0.2, -0.1],
//!     order: AxisOrder::Xyz,
//! };
//! let out = rotate_volume(&src, &spec, &ResampleOptions::default()).unwrap();
//! assert!(out.dims().len() > 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use voxrot_core::*;

// Re-export the transform crate as a module
pub use voxrot_transform as transform;
