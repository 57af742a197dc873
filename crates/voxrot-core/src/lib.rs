//! Voxrot Core - Basic data structures for volumetric resampling
//!
//! This crate provides the fundamental data structures used throughout
//! the voxrot volumetric rotation library:
//!
//! - [`Volume`] - Dense 3D scalar grid in a flat `f32` buffer
//! - [`Dims3`] - Grid dimensions with center and bounds helpers
//! - [`Point3`] / [`IntPoint3`] - Transient per-voxel 3-vectors
//!
//! # Axis and flattening convention
//!
//! Coordinates are (x, y, z) with x the fastest-varying axis in memory:
//! the voxel at (x, y, z) lives at index `x + dims.x * (y + dims.y * z)`.
//! Every operation in the workspace uses this one convention for both
//! reads and writes.

pub mod error;
pub mod volume;

pub use error::{Error, Result};
pub use volume::{Dims3, IntPoint3, Point3, Volume};
