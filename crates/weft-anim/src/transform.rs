//! 2D affine matrices for the `matrix` property.
//!
//! # Usage
//!
//! ```ignore
//! use weft_anim::transform::Matrix;
//!
//! let m = Matrix::translate(100.0, 50.0)
//!     .then(&Matrix::scale(2.0, 1.0))
//!     .then(&Matrix::rotate_deg(45.0));
//!
//! // Decomposition is what the interpolator blends
//! let parts = m.decompose();
//! assert_eq!(Matrix::from_decomposed(&parts), m);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix (the bottom row [0, 0, 1] is implicit):
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0  1  |
/// ```
///
/// On the wire it is the flat array `[a, b, c, d, tx, ty]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 6]", into = "[f64; 6]")]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self {
            tx,
            ty,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Rotation by `angle` radians.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn rotate_deg(angle: f64) -> Self {
        Self::rotate(angle * PI / 180.0)
    }

    /// Rotation by `angle` radians around the point `(cx, cy)`.
    pub fn rotate_around(angle: f64, cx: f64, cy: f64) -> Self {
        Self::translate(cx, cy)
            .then(&Self::rotate(angle))
            .then(&Self::translate(-cx, -cy))
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            tx: self.a * other.tx + self.c * other.ty + self.tx,
            ty: self.b * other.tx + self.d * other.ty + self.ty,
        }
    }

    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Split into rotation, scale and translation.
    ///
    /// Matrix layout: a = sx*cos(θ), b = sy*sin(θ), c = -sx*sin(θ), d = sy*cos(θ).
    /// Shear is not represented and is lost.
    pub fn decompose(&self) -> DecomposedMatrix {
        let scale_x = self.a.hypot(self.c);
        let angle = if scale_x != 0.0 {
            (-self.c).atan2(self.a)
        } else {
            self.b.atan2(self.d)
        };

        let (sin, cos) = angle.sin_cos();
        let scale_y = if cos.abs() >= sin.abs() {
            self.d / cos
        } else {
            self.b / sin
        };

        DecomposedMatrix {
            angle,
            scale_x,
            scale_y,
            translate_x: self.tx,
            translate_y: self.ty,
        }
    }

    /// Rebuild a matrix as translate * scale * rotate: points are rotated,
    /// then scaled, then translated.
    pub fn from_decomposed(parts: &DecomposedMatrix) -> Self {
        let (sin, cos) = parts.angle.sin_cos();
        Self {
            a: cos * parts.scale_x,
            b: sin * parts.scale_y,
            c: -sin * parts.scale_x,
            d: cos * parts.scale_y,
            tx: parts.translate_x,
            ty: parts.translate_y,
        }
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.a - 1.0).abs() < epsilon
            && self.b.abs() < epsilon
            && self.c.abs() < epsilon
            && (self.d - 1.0).abs() < epsilon
            && self.tx.abs() < epsilon
            && self.ty.abs() < epsilon
    }
}

impl std::ops::Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.then(&rhs)
    }
}

impl From<[f64; 6]> for Matrix {
    fn from([a, b, c, d, tx, ty]: [f64; 6]) -> Self {
        Self { a, b, c, d, tx, ty }
    }
}

impl From<Matrix> for [f64; 6] {
    fn from(m: Matrix) -> Self {
        [m.a, m.b, m.c, m.d, m.tx, m.ty]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "matrix({},{},{},{},{},{})",
            self.a, self.b, self.c, self.d, self.tx, self.ty
        )
    }
}

/// Independently blendable components of a [`Matrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedMatrix {
    /// Rotation in radians.
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}
