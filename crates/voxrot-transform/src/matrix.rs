//! Rotation matrix construction
//!
//! Builds a 3x3 orthonormal rotation matrix from a [`RotationSpec`],
//! either directly from explicit coefficients or from three Euler angles
//! composed under one of the supported axis-order conventions.
//!
//! Each convention is a distinct closed-form expansion of its elementary
//! rotation product, not a runtime matrix multiply. The supported orders
//! and their compositions:
//!
//! - `Xyz`: `Rx(a) * Ry(b) * Rz(c)`
//! - `Yzx`: `Ry(a) * Rz(b) * Rx(c)`
//! - `Yzy`: `Ry(a) * Rz(b) * Ry(c)`
//! - `Zxz`: `Rz(a) * Rx(b) * Rz(c)`
//!
//! Angles are in radians and are applied about the axes named by the
//! order, in the stated sequence. No wrapping or normalization of angle
//! ranges is performed.

use std::str::FromStr;

use crate::{TransformError, TransformResult};
use voxrot_core::Point3;

/// Euler-angle axis-order convention
///
/// All four orders are equally supported; there is no implicit default
/// when parsing, and an unrecognized tag is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// X, then Y, then Z
    Xyz,
    /// Y, then Z, then X
    Yzx,
    /// Y, then Z, then Y again
    Yzy,
    /// Z, then X, then Z again
    Zxz,
}

impl FromStr for AxisOrder {
    type Err = TransformError;

    fn from_str(s: &str) -> TransformResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xyz" => Ok(AxisOrder::Xyz),
            "yzx" => Ok(AxisOrder::Yzx),
            "yzy" => Ok(AxisOrder::Yzy),
            "zxz" => Ok(AxisOrder::Zxz),
            _ => Err(TransformError::InvalidConvention(s.to_string())),
        }
    }
}

/// 3x3 rotation matrix, row-major, `f64` coefficients
///
/// Derived once per resample call and reused for every voxel. For any
/// angle triple the built matrix is orthonormal up to floating-point
/// tolerance; explicit coefficients are taken as supplied and are not
/// validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix([[f64; 3]; 3]);

impl RotationMatrix {
    /// Wrap explicit row-major coefficients
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        RotationMatrix(rows)
    }

    /// The identity rotation
    pub const fn identity() -> Self {
        RotationMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Row-major coefficient access
    #[inline]
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Apply the matrix to a point: `M . p`
    #[inline]
    pub fn apply(&self, p: Point3) -> Point3 {
        let m = &self.0;
        [
            p[0] * m[0][0] + p[1] * m[0][1] + p[2] * m[0][2],
            p[0] * m[1][0] + p[1] * m[1][1] + p[2] * m[1][2],
            p[0] * m[2][0] + p[1] * m[2][1] + p[2] * m[2][2],
        ]
    }

    /// The transposed matrix
    ///
    /// For an orthonormal matrix the transpose is the inverse, so this
    /// undoes the rotation.
    pub fn transposed(&self) -> Self {
        let m = &self.0;
        RotationMatrix([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }
}

/// Rotation specification: explicit matrix or Euler angles + convention
///
/// Immutable input to one resample invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationSpec {
    /// Nine explicit row-major coefficients, used as supplied
    Matrix(RotationMatrix),
    /// Three angles in radians, composed per the axis order
    Euler {
        /// Angles about the first, second, and third axis of the order
        angles: [f64; 3],
        /// Axis-order convention
        order: AxisOrder,
    },
}

impl RotationSpec {
    /// The identity rotation
    pub const fn identity() -> Self {
        RotationSpec::Matrix(RotationMatrix::identity())
    }

    /// Build a spec from the raw wire encoding: nine row-major
    /// coefficients, or three angles plus a convention identifier
    ///
    /// Explicit coefficients take precedence when both are supplied.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` if neither form is present (angles without
    /// an order tag included), or `InvalidConvention` for an
    /// unrecognized order tag.
    pub fn from_parts(
        coefficients: Option<[f64; 9]>,
        angles: Option<[f64; 3]>,
        order: Option<&str>,
    ) -> TransformResult<Self> {
        if let Some(c) = coefficients {
            return Ok(RotationSpec::Matrix(RotationMatrix::from_rows([
                [c[0], c[1], c[2]],
                [c[3], c[4], c[5]],
                [c[6], c[7], c[8]],
            ])));
        }
        match (angles, order) {
            (Some(angles), Some(order)) => Ok(RotationSpec::Euler {
                angles,
                order: order.parse()?,
            }),
            (Some(_), None) => Err(TransformError::InvalidSpec(
                "angles supplied without a convention",
            )),
            _ => Err(TransformError::InvalidSpec(
                "neither matrix coefficients nor angles supplied",
            )),
        }
    }
}

/// Build the rotation matrix for a spec
///
/// Explicit coefficients are passed through; Euler angles are expanded
/// with the closed form for their convention.
pub fn build_matrix(spec: &RotationSpec) -> RotationMatrix {
    match *spec {
        RotationSpec::Matrix(m) => m,
        RotationSpec::Euler { angles, order } => {
            let [a, b, c] = angles;
            match order {
                AxisOrder::Xyz => matrix_xyz(a, b, c),
                AxisOrder::Yzx => matrix_yzx(a, b, c),
                AxisOrder::Yzy => matrix_yzy(a, b, c),
                AxisOrder::Zxz => matrix_zxz(a, b, c),
            }
        }
    }
}

/// Closed form of `Rx(a) * Ry(b) * Rz(c)`
pub fn matrix_xyz(a: f64, b: f64, c: f64) -> RotationMatrix {
    let (sa, ca) = a.sin_cos();
    let (sb, cb) = b.sin_cos();
    let (sc, cc) = c.sin_cos();
    RotationMatrix([
        [cb * cc, -cb * sc, sb],
        [ca * sc + sa * sb * cc, ca * cc - sa * sb * sc, -sa * cb],
        [sa * sc - ca * sb * cc, sa * cc + ca * sb * sc, ca * cb],
    ])
}

/// Closed form of `Ry(a) * Rz(b) * Rx(c)`
pub fn matrix_yzx(a: f64, b: f64, c: f64) -> RotationMatrix {
    let (sa, ca) = a.sin_cos();
    let (sb, cb) = b.sin_cos();
    let (sc, cc) = c.sin_cos();
    RotationMatrix([
        [ca * cb, sa * sc - ca * sb * cc, ca * sb * sc + sa * cc],
        [sb, cb * cc, -cb * sc],
        [-sa * cb, sa * sb * cc + ca * sc, ca * cc - sa * sb * sc],
    ])
}

/// Closed form of `Ry(a) * Rz(b) * Ry(c)`
pub fn matrix_yzy(a: f64, b: f64, c: f64) -> RotationMatrix {
    let (sa, ca) = a.sin_cos();
    let (sb, cb) = b.sin_cos();
    let (sc, cc) = c.sin_cos();
    RotationMatrix([
        [ca * cb * cc - sa * sc, -ca * sb, ca * cb * sc + sa * cc],
        [sb * cc, cb, sb * sc],
        [-sa * cb * cc - ca * sc, sa * sb, ca * cc - sa * cb * sc],
    ])
}

/// Closed form of `Rz(a) * Rx(b) * Rz(c)`
pub fn matrix_zxz(a: f64, b: f64, c: f64) -> RotationMatrix {
    let (sa, ca) = a.sin_cos();
    let (sb, cb) = b.sin_cos();
    let (sc, cc) = c.sin_cos();
    RotationMatrix([
        [ca * cc - sa * cb * sc, -ca * sc - sa * cb * cc, sa * sb],
        [sa * cc + ca * cb * sc, ca * cb * cc - sa * sc, -ca * sb],
        [sb * sc, sb * cc, cb],
    ])
}
