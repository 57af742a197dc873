//! Error types for voxrot-transform

use thiserror::Error;

/// Errors that can occur when building or applying a rotation
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] voxrot_core::Error),

    /// Unrecognized Euler-angle convention tag
    #[error("invalid convention: {0:?} (expected one of xyz, yzx, yzy, zxz)")]
    InvalidConvention(String),

    /// Rotation specification carries neither matrix coefficients nor
    /// angles with a convention
    #[error("invalid rotation spec: {0}")]
    InvalidSpec(&'static str),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
