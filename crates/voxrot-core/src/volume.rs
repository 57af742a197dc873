//! Volume - dense 3D scalar grid
//!
//! `Volume` is a 3D array of `f32` values stored in a single flat buffer,
//! used as the source and destination of resampling operations.
//!
//! # Memory layout
//!
//! Data is stored with x varying fastest and no padding. The voxel at
//! (x, y, z) is at index `x + dims.x * (y + dims.y * z)`. This single
//! convention is used everywhere, for both reads and writes.
//!
//! # Examples
//!
//! ```
//! use voxrot_core::{Dims3, Volume};
//!
//! let mut vol = Volume::new(Dims3::new(16, 16, 8)).unwrap();
//! vol.set_voxel(3, 4, 5, 1.5).unwrap();
//! assert_eq!(vol.get_voxel(3, 4, 5).unwrap(), 1.5);
//! ```

use crate::error::{Error, Result};

/// Transient floating-point 3-vector used within per-voxel computations
pub type Point3 = [f64; 3];

/// Transient integer 3-vector used within per-voxel computations
pub type IntPoint3 = [i64; 3];

/// Dimensions of a 3D grid
///
/// All axes must be positive; zero dimensions are rejected at `Volume`
/// construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims3 {
    /// Extent along x (fastest-varying axis)
    pub x: u32,
    /// Extent along y
    pub y: u32,
    /// Extent along z (slowest-varying axis)
    pub z: u32,
}

impl Dims3 {
    /// Create dimensions from the three axis extents
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Dims3 { x, y, z }
    }

    /// Total number of voxels
    #[inline]
    pub fn len(&self) -> usize {
        (self.x as usize) * (self.y as usize) * (self.z as usize)
    }

    /// True if any axis has zero extent
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Geometric center of the grid, per axis: `(extent - 1) / 2`
    ///
    /// Uses floating-point division, so even extents yield a
    /// half-integer center.
    #[inline]
    pub fn center(&self) -> Point3 {
        [
            (self.x as f64 - 1.0) / 2.0,
            (self.y as f64 - 1.0) / 2.0,
            (self.z as f64 - 1.0) / 2.0,
        ]
    }

    /// True if the rounded integer point lies within the grid on all
    /// three axes
    #[inline]
    pub fn contains(&self, p: IntPoint3) -> bool {
        p[0] >= 0
            && p[0] < self.x as i64
            && p[1] >= 0
            && p[1] < self.y as i64
            && p[2] >= 0
            && p[2] < self.z as i64
    }
}

/// Dense 3D scalar volume
///
/// A flat buffer of `f32` samples plus its dimensions. Unlike packed
/// integer image formats, one `f32` is stored per voxel, allowing
/// tomographic and microscopy data to keep full sample precision.
#[derive(Debug, Clone)]
pub struct Volume {
    /// Grid dimensions
    dims: Dims3,
    /// Voxel data (x fastest, no padding)
    data: Vec<f32>,
}

impl Volume {
    /// Create a new volume with all voxels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any axis is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxrot_core::{Dims3, Volume};
    ///
    /// let vol = Volume::new(Dims3::new(64, 64, 32)).unwrap();
    /// assert_eq!(vol.data().len(), 64 * 64 * 32);
    /// ```
    pub fn new(dims: Dims3) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidDimension {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            });
        }

        Ok(Volume {
            dims,
            data: vec![0.0f32; dims.len()],
        })
    }

    /// Create a new volume with all voxels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any axis is 0.
    pub fn new_with_value(dims: Dims3, value: f32) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidDimension {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            });
        }

        Ok(Volume {
            dims,
            data: vec![value; dims.len()],
        })
    }

    /// Create a volume from an existing flat buffer
    ///
    /// # Arguments
    ///
    /// * `dims` - Grid dimensions
    /// * `data` - Voxel data, x fastest
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any axis is 0, or
    /// `Error::DimensionMismatch` if the buffer length does not equal
    /// the product of the dimensions.
    pub fn from_data(dims: Dims3, data: Vec<f32>) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::InvalidDimension {
                x: dims.x,
                y: dims.y,
                z: dims.z,
            });
        }

        let expected = dims.len();
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                x: dims.x,
                y: dims.y,
                z: dims.z,
                expected,
                actual: data.len(),
            });
        }

        Ok(Volume { dims, data })
    }

    /// Get the grid dimensions
    #[inline]
    pub fn dims(&self) -> Dims3 {
        self.dims
    }

    /// Linear index of the voxel at (x, y, z)
    ///
    /// x varies fastest: `x + dims.x * (y + dims.y * z)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        (x as usize) + (self.dims.x as usize) * ((y as usize) + (self.dims.y as usize) * (z as usize))
    }

    /// Get the voxel value at (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is out of range.
    #[inline]
    pub fn get_voxel(&self, x: u32, y: u32, z: u32) -> Result<f32> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return Err(self.out_of_bounds(x, y, z));
        }
        Ok(self.data[self.index(x, y, z)])
    }

    /// Set the voxel value at (x, y, z)
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is out of range.
    #[inline]
    pub fn set_voxel(&mut self, x: u32, y: u32, z: u32, value: f32) -> Result<()> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return Err(self.out_of_bounds(x, y, z));
        }
        let idx = self.index(x, y, z);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the voxel value at (x, y, z) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn get_voxel_unchecked(&self, x: u32, y: u32, z: u32) -> f32 {
        self.data[self.index(x, y, z)]
    }

    /// Set the voxel value at (x, y, z) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    #[inline]
    pub fn set_voxel_unchecked(&mut self, x: u32, y: u32, z: u32, value: f32) {
        let idx = self.index(x, y, z);
        self.data[idx] = value;
    }

    /// Get raw access to the voxel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the voxel data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get one z-slab of voxel data (a full x-y plane)
    ///
    /// # Panics
    ///
    /// Panics if `z >= dims.z`.
    #[inline]
    pub fn slab(&self, z: u32) -> &[f32] {
        let plane = (self.dims.x as usize) * (self.dims.y as usize);
        let start = (z as usize) * plane;
        &self.data[start..start + plane]
    }

    /// Fill every voxel with a constant value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Consume the volume and return its flat buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    fn out_of_bounds(&self, x: u32, y: u32, z: u32) -> Error {
        Error::OutOfBounds {
            x,
            y,
            z,
            dx: self.dims.x,
            dy: self.dims.y,
            dz: self.dims.z,
        }
    }
}
