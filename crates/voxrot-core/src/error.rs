//! Error types for voxrot-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Voxrot core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid volume dimensions (every axis must be positive)
    #[error("invalid volume dimensions: {x}x{y}x{z}")]
    InvalidDimension { x: u32, y: u32, z: u32 },

    /// Buffer length does not match the product of the stated dimensions
    #[error("dimension mismatch: dims {x}x{y}x{z} require {expected} voxels, buffer has {actual}")]
    DimensionMismatch {
        x: u32,
        y: u32,
        z: u32,
        expected: usize,
        actual: usize,
    },

    /// Voxel coordinate out of bounds
    #[error("voxel out of bounds: ({x}, {y}, {z}) in {dx}x{dy}x{dz}")]
    OutOfBounds {
        x: u32,
        y: u32,
        z: u32,
        dx: u32,
        dy: u32,
        dz: u32,
    },
}

/// Result type alias for voxrot core operations
pub type Result<T> = std::result::Result<T, Error>;
