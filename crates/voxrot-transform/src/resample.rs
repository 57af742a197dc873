//! Nearest-neighbor rotation resampling
//!
//! Resamples a source [`Volume`] into a destination volume under a rigid
//! rotation about the grid centers. Two mapping modes are provided:
//!
//! - **Gather** (the default): walk destination voxels and pull each
//!   value from the inverse-rotated source location. Every destination
//!   voxel is written at most once, so the loop parallelizes over
//!   destination z-slabs with no write contention.
//! - **Scatter**: walk source voxels and push each value to the rotated
//!   destination location. Several source voxels may round to the same
//!   destination voxel; the last writer wins. The loop runs sequentially
//!   so the surviving writer is the same on every run.
//!
//! In both modes a mapped point that rounds outside the indexed volume
//! is skipped silently and the destination voxel keeps its prior value.
//! Rounding is half-away-from-zero on each axis.

use rayon::prelude::*;

use crate::matrix::{RotationMatrix, RotationSpec, build_matrix};
use crate::{TransformError, TransformResult};
use voxrot_core::{Dims3, IntPoint3, Point3, Volume};

/// Which direction the per-voxel mapping runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingMode {
    /// Iterate destination voxels, sample from the inverse-rotated
    /// source location (one write per destination voxel)
    #[default]
    Gather,
    /// Iterate source voxels, write to the rotated destination location
    /// (many-to-one, last writer wins)
    Scatter,
}

/// Options for [`rotate_volume`]
#[derive(Debug, Clone)]
pub struct ResampleOptions {
    /// Mapping direction
    pub mode: MappingMode,
    /// Size the output to the bounding box of the rotated input extent;
    /// when false the output keeps the source dimensions
    pub expand: bool,
    /// Background value for destination voxels no source point maps onto
    pub fill: f32,
}

impl Default for ResampleOptions {
    fn default() -> Self {
        Self {
            mode: MappingMode::Gather,
            expand: true,
            fill: 0.0,
        }
    }
}

impl ResampleOptions {
    /// Create options with a specific mapping mode
    pub fn with_mode(mode: MappingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Create options with a specific background value
    pub fn with_fill(fill: f32) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }

    /// Set whether to expand the output dimensions
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }
}

/// Map a voxel coordinate of the `from` grid into the `to` grid's frame
///
/// The coordinate is translated so the `from` grid's center sits at the
/// origin, rotated by `matrix`, and translated back by the `to` grid's
/// center. Centers are `(extent - 1) / 2` per axis in floating point, so
/// even extents pivot about a half-integer center.
#[inline]
pub fn map_point(voxel: IntPoint3, from: Dims3, to: Dims3, matrix: &RotationMatrix) -> Point3 {
    let c_from = from.center();
    let c_to = to.center();
    let centered = [
        voxel[0] as f64 - c_from[0],
        voxel[1] as f64 - c_from[1],
        voxel[2] as f64 - c_from[2],
    ];
    let rotated = matrix.apply(centered);
    [
        rotated[0] + c_to[0],
        rotated[1] + c_to[1],
        rotated[2] + c_to[2],
    ]
}

/// Round a mapped point to the nearest lattice coordinate, half away
/// from zero on each axis
#[inline]
fn round_point(p: Point3) -> IntPoint3 {
    [
        p[0].round() as i64,
        p[1].round() as i64,
        p[2].round() as i64,
    ]
}

/// Resample `source` into `dest` under the rotation described by `spec`
///
/// Mutates `dest` in place: each destination voxel is either overwritten
/// with the nearest-neighbor source sample or left at its prior value
/// when no in-bounds source point maps onto it. Neither volume's storage
/// is reallocated.
///
/// # Arguments
/// * `source` - Source volume (read-only)
/// * `dest` - Destination volume, pre-filled with the desired background
/// * `spec` - Rotation as explicit matrix or Euler angles + convention
/// * `mode` - Mapping direction (gather is the canonical choice)
///
/// # Example
/// ```
/// use voxrot_core::{Dims3, Volume};
/// use voxrot_transform::{AxisOrder, MappingMode, RotationSpec, resample};
///
/// let src = Volume::new(Dims3::new(8, 8, 8)).unwrap();
/// let mut dst = Volume::new(Dims3::new(8, 8, 8)).unwrap();
/// let spec = RotationSpec::Euler {
///     angles: [0.0, 0.0, 0.5],
///     order: AxisOrder::Xyz,
/// };
/// resample(&src, &mut dst, &spec, MappingMode::Gather).unwrap();
/// ```
pub fn resample(
    source: &Volume,
    dest: &mut Volume,
    spec: &RotationSpec,
    mode: MappingMode,
) -> TransformResult<()> {
    let matrix = build_matrix(spec);
    resample_with_matrix(source, dest, &matrix, mode);
    Ok(())
}

/// Resample with a pre-built rotation matrix
pub fn resample_with_matrix(
    source: &Volume,
    dest: &mut Volume,
    matrix: &RotationMatrix,
    mode: MappingMode,
) {
    match mode {
        MappingMode::Gather => gather(source, dest, matrix),
        MappingMode::Scatter => scatter(source, dest, matrix),
    }
}

/// Gather: one inverse-rotated read per destination voxel
fn gather(source: &Volume, dest: &mut Volume, matrix: &RotationMatrix) {
    let src_dims = source.dims();
    let dst_dims = dest.dims();
    // The transpose of an orthonormal matrix is its inverse.
    let inverse = matrix.transposed();
    let plane = (dst_dims.x as usize) * (dst_dims.y as usize);

    dest.data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            for y in 0..dst_dims.y {
                let row = (y as usize) * (dst_dims.x as usize);
                for x in 0..dst_dims.x {
                    let p = round_point(map_point(
                        [x as i64, y as i64, z as i64],
                        dst_dims,
                        src_dims,
                        &inverse,
                    ));
                    if src_dims.contains(p) {
                        slab[row + x as usize] =
                            source.get_voxel_unchecked(p[0] as u32, p[1] as u32, p[2] as u32);
                    }
                }
            }
        });
}

/// Scatter: one rotated write per source voxel, last writer wins
fn scatter(source: &Volume, dest: &mut Volume, matrix: &RotationMatrix) {
    let src_dims = source.dims();
    let dst_dims = dest.dims();

    for z in 0..src_dims.z {
        for y in 0..src_dims.y {
            for x in 0..src_dims.x {
                let q = round_point(map_point(
                    [x as i64, y as i64, z as i64],
                    src_dims,
                    dst_dims,
                    matrix,
                ));
                if dst_dims.contains(q) {
                    let val = source.get_voxel_unchecked(x, y, z);
                    dest.set_voxel_unchecked(q[0] as u32, q[1] as u32, q[2] as u32, val);
                }
            }
        }
    }
}

/// Dimensions of the axis-aligned bounding box of the rotated input
/// extent
///
/// Rotates the seven nonzero corner vectors of the input box, takes the
/// componentwise absolute maximum, and rounds to the nearest integer.
/// Each axis is clamped to at least 1 so the result is always a valid
/// grid size.
pub fn rotated_dims(dims: Dims3, matrix: &RotationMatrix) -> Dims3 {
    let (dx, dy, dz) = (dims.x as f64, dims.y as f64, dims.z as f64);
    let corners: [Point3; 7] = [
        [dx, 0.0, 0.0],
        [0.0, dy, 0.0],
        [dx, dy, 0.0],
        [0.0, 0.0, dz],
        [dx, 0.0, dz],
        [0.0, dy, dz],
        [dx, dy, dz],
    ];

    let mut extent = [0.0f64; 3];
    for corner in corners {
        let r = matrix.apply(corner);
        for axis in 0..3 {
            extent[axis] = extent[axis].max(r[axis].abs());
        }
    }

    Dims3::new(
        (extent[0].round() as u32).max(1),
        (extent[1].round() as u32).max(1),
        (extent[2].round() as u32).max(1),
    )
}

/// Rotate a volume into a freshly allocated destination
///
/// Convenience wrapper around [`resample`]: builds the matrix, sizes the
/// output (rotated bounding box when `options.expand` is set, source
/// dimensions otherwise), fills it with `options.fill`, and resamples.
///
/// # Errors
///
/// Returns a core error if the destination volume cannot be constructed.
pub fn rotate_volume(
    source: &Volume,
    spec: &RotationSpec,
    options: &ResampleOptions,
) -> TransformResult<Volume> {
    let matrix = build_matrix(spec);
    let out_dims = if options.expand {
        rotated_dims(source.dims(), &matrix)
    } else {
        source.dims()
    };

    let mut dest = Volume::new_with_value(out_dims, options.fill).map_err(TransformError::Core)?;
    resample_with_matrix(source, &mut dest, &matrix, options.mode);
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{AxisOrder, matrix_xyz};
    use std::f64::consts::FRAC_PI_2;

    fn spec_z_quarter_turn() -> RotationSpec {
        RotationSpec::Euler {
            angles: [0.0, 0.0, FRAC_PI_2],
            order: AxisOrder::Xyz,
        }
    }

    /// Volume whose voxel values equal their linear index, for tracking
    /// where samples land
    fn indexed_volume(dims: Dims3) -> Volume {
        let data = (0..dims.len()).map(|i| i as f32).collect();
        Volume::from_data(dims, data).unwrap()
    }

    #[test]
    fn test_identity_gather_reproduces_source() {
        let src = indexed_volume(Dims3::new(4, 5, 3));
        let mut dst = Volume::new(src.dims()).unwrap();
        resample(&src, &mut dst, &RotationSpec::identity(), MappingMode::Gather).unwrap();
        assert_eq!(src.data(), dst.data());
    }

    #[test]
    fn test_identity_scatter_reproduces_source() {
        let src = indexed_volume(Dims3::new(4, 5, 3));
        let mut dst = Volume::new(src.dims()).unwrap();
        resample(&src, &mut dst, &RotationSpec::identity(), MappingMode::Scatter).unwrap();
        assert_eq!(src.data(), dst.data());
    }

    #[test]
    fn test_quarter_turn_moves_single_voxel() {
        // 3x3x3, source[(2,1,1)] = 7, 90 degrees about z under XYZ.
        // (2,1,1) centered is (1,0,0); Rz maps it to (0,1,0), so the
        // value lands at (1,2,1). Every other voxel stays zero.
        let mut src = Volume::new(Dims3::new(3, 3, 3)).unwrap();
        src.set_voxel(2, 1, 1, 7.0).unwrap();

        for mode in [MappingMode::Gather, MappingMode::Scatter] {
            let mut dst = Volume::new(Dims3::new(3, 3, 3)).unwrap();
            resample(&src, &mut dst, &spec_z_quarter_turn(), mode).unwrap();
            assert_eq!(dst.get_voxel(1, 2, 1).unwrap(), 7.0);
            let hits = dst.data().iter().filter(|&&v| v != 0.0).count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_gather_and_scatter_agree_on_lattice_rotation() {
        // A quarter turn maps the odd cube's lattice onto itself
        // bijectively, so both directions produce the same volume.
        let src = indexed_volume(Dims3::new(3, 3, 3));
        let spec = spec_z_quarter_turn();

        let mut gathered = Volume::new(src.dims()).unwrap();
        resample(&src, &mut gathered, &spec, MappingMode::Gather).unwrap();
        let mut scattered = Volume::new(src.dims()).unwrap();
        resample(&src, &mut scattered, &spec, MappingMode::Scatter).unwrap();
        assert_eq!(gathered.data(), scattered.data());
    }

    #[test]
    fn test_round_trip_restores_voxel() {
        // Rotate, then resample with the transposed matrix; the marked
        // voxel returns home exactly on the odd-dimension lattice.
        let mut src = Volume::new(Dims3::new(5, 5, 5)).unwrap();
        src.set_voxel(4, 2, 2, 3.5).unwrap();

        let m = matrix_xyz(0.0, 0.0, FRAC_PI_2);
        let mut turned = Volume::new(src.dims()).unwrap();
        resample_with_matrix(&src, &mut turned, &m, MappingMode::Gather);
        assert_eq!(turned.get_voxel(2, 4, 2).unwrap(), 3.5);

        let mut back = Volume::new(src.dims()).unwrap();
        resample_with_matrix(&turned, &mut back, &m.transposed(), MappingMode::Gather);
        assert_eq!(back.data(), src.data());
    }

    #[test]
    fn test_center_voxel_survives_round_trip() {
        // 5x5x5 with a single nonzero voxel at the exact center.
        let mut src = Volume::new(Dims3::new(5, 5, 5)).unwrap();
        src.set_voxel(2, 2, 2, 1.0).unwrap();

        let spec = RotationSpec::Euler {
            angles: [0.4, -0.9, 1.7],
            order: AxisOrder::Zxz,
        };
        let m = build_matrix(&spec);
        let mut turned = Volume::new(src.dims()).unwrap();
        resample_with_matrix(&src, &mut turned, &m, MappingMode::Gather);
        let mut back = Volume::new(src.dims()).unwrap();
        resample_with_matrix(&turned, &mut back, &m.transposed(), MappingMode::Gather);
        assert_eq!(back.get_voxel(2, 2, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_tiny_destination_skips_out_of_bounds() {
        // Only the source center can land in a 1x1x1 destination; all
        // other mapped points round outside it and are skipped.
        let mut src = Volume::new_with_value(Dims3::new(5, 5, 5), 1.0).unwrap();
        src.set_voxel(2, 2, 2, 9.0).unwrap();

        let spec = RotationSpec::Euler {
            angles: [0.3, 0.6, 0.9],
            order: AxisOrder::Yzx,
        };
        let mut dst = Volume::new(Dims3::new(1, 1, 1)).unwrap();
        resample(&src, &mut dst, &spec, MappingMode::Scatter).unwrap();
        assert_eq!(dst.get_voxel(0, 0, 0).unwrap(), 9.0);

        let mut dst = Volume::new(Dims3::new(1, 1, 1)).unwrap();
        resample(&src, &mut dst, &spec, MappingMode::Gather).unwrap();
        assert_eq!(dst.get_voxel(0, 0, 0).unwrap(), 9.0);
    }

    #[test]
    fn test_all_out_of_bounds_leaves_background() {
        // Even source extents put the center at (1.5, 1.5, 1.5), so
        // every voxel maps at least 0.5 away from the 1x1x1 destination
        // center and rounds out of bounds. The destination keeps its
        // initial value and nothing faults.
        let src = Volume::new_with_value(Dims3::new(4, 4, 4), 1.0).unwrap();
        let mut dst = Volume::new_with_value(Dims3::new(1, 1, 1), -4.0).unwrap();
        resample(&src, &mut dst, &RotationSpec::identity(), MappingMode::Scatter).unwrap();
        assert_eq!(dst.get_voxel(0, 0, 0).unwrap(), -4.0);
    }

    #[test]
    fn test_rotated_dims_quarter_turn_swaps_extents() {
        let m = matrix_xyz(0.0, 0.0, FRAC_PI_2);
        let out = rotated_dims(Dims3::new(6, 4, 2), &m);
        assert_eq!(out, Dims3::new(4, 6, 2));
    }

    #[test]
    fn test_rotated_dims_identity() {
        let out = rotated_dims(Dims3::new(7, 3, 9), &RotationMatrix::identity());
        assert_eq!(out, Dims3::new(7, 3, 9));
    }

    #[test]
    fn test_rotate_volume_expands() {
        let src = indexed_volume(Dims3::new(6, 4, 2));
        let spec = spec_z_quarter_turn();
        let out = rotate_volume(&src, &spec, &ResampleOptions::default()).unwrap();
        assert_eq!(out.dims(), Dims3::new(4, 6, 2));
    }

    #[test]
    fn test_rotate_volume_fill() {
        // An eighth turn of a flat square needs a larger bounding box;
        // the output corners fall outside the source and keep the fill
        // value while the interior carries source samples.
        let src = Volume::new_with_value(Dims3::new(5, 5, 1), 5.0).unwrap();
        let spec = RotationSpec::Euler {
            angles: [0.0, 0.0, std::f64::consts::FRAC_PI_4],
            order: AxisOrder::Xyz,
        };
        let out = rotate_volume(&src, &spec, &ResampleOptions::with_fill(-1.0)).unwrap();
        assert!(out.data().iter().all(|&v| v == 5.0 || v == -1.0));
        assert!(out.data().contains(&5.0));
        assert!(out.data().contains(&-1.0));
    }

    #[test]
    fn test_rotate_volume_no_expand_keeps_dims() {
        let src = indexed_volume(Dims3::new(6, 4, 2));
        let out = rotate_volume(
            &src,
            &spec_z_quarter_turn(),
            &ResampleOptions::default().expand(false),
        )
        .unwrap();
        assert_eq!(out.dims(), src.dims());
    }

    #[test]
    fn test_map_point_even_dims_half_integer_center() {
        // Identity mapping between two 4-wide grids is exact even with
        // the half-integer center.
        let dims = Dims3::new(4, 4, 4);
        let p = map_point([3, 0, 2], dims, dims, &RotationMatrix::identity());
        assert_eq!(p, [3.0, 0.0, 2.0]);
    }
}
