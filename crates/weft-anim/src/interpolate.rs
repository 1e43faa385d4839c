//! Interpolation of animatable values.
//!
//! The [`Interpolate`] trait covers the concrete shapes; [`blend`] dispatches
//! over [`Value`] and rejects mismatched shapes instead of guessing.
//!
//! Matrices are never blended entry by entry: both ends are decomposed into
//! rotation, scale and translation, each component is blended, and the
//! result is recomposed. Rigid transforms therefore stay rigid mid-flight.

use crate::error::AnimError;
use crate::transform::{DecomposedMatrix, Matrix};
use crate::value::{Rgba, Value, lerp};

/// Types that can be interpolated between two values.
///
/// When `t = 0.0` the result is `self`, when `t = 1.0` it is `to`.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for Rgba {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for DecomposedMatrix {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            angle: lerp(self.angle, to.angle, t),
            scale_x: lerp(self.scale_x, to.scale_x, t),
            scale_y: lerp(self.scale_y, to.scale_y, t),
            translate_x: lerp(self.translate_x, to.translate_x, t),
            translate_y: lerp(self.translate_y, to.translate_y, t),
        }
    }
}

impl Interpolate for Matrix {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        // Endpoints are returned as-is so a finished tween lands exactly
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *to;
        }
        let parts = self.decompose().interpolate(&to.decompose(), t);
        Matrix::from_decomposed(&parts)
    }
}

/// Blend `from` into `to` at `fraction`.
///
/// Both values must share a shape. Sequences blend element-wise and must
/// have equal length.
pub fn blend(from: &Value, to: &Value, fraction: f64) -> Result<Value, AnimError> {
    match (from, to) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.interpolate(b, fraction))),
        (Value::Color(a), Value::Color(b)) => Ok(Value::Color(a.interpolate(b, fraction))),
        (Value::Transform(a), Value::Transform(b)) => {
            Ok(Value::Transform(a.interpolate(b, fraction)))
        }
        (Value::Sequence(a), Value::Sequence(b)) => {
            if a.len() != b.len() {
                return Err(AnimError::SequenceLength {
                    from: a.len(),
                    to: b.len(),
                });
            }
            a.iter()
                .zip(b)
                .map(|(x, y)| blend(x, y, fraction))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence)
        }
        _ => Err(AnimError::UnsupportedBlend {
            from: from.kind(),
            to: to.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_blend_numbers() {
        let v = blend(&Value::Number(10.0), &Value::Number(20.0), 0.25).unwrap();
        assert_eq!(v, Value::Number(12.5));
    }

    #[test]
    fn test_blend_colors_midpoint() {
        let from = Value::Color(Rgba::parse("rgba(0,0,0,1)").unwrap());
        let to = Value::Color(Rgba::parse("rgba(255,255,255,1)").unwrap());
        let mid = blend(&from, &to, 0.5).unwrap();
        let color = mid.as_color().unwrap();
        assert!(approx_eq(color.r, 127.5));
        assert!(approx_eq(color.g, 127.5));
        assert!(approx_eq(color.b, 127.5));
        assert!(approx_eq(color.a, 1.0));
        assert_eq!(color.to_string(), "rgba(127.5,127.5,127.5,1)");
    }

    #[test]
    fn test_blend_matrix_stays_rigid() {
        let from = Matrix::identity();
        let to = Matrix::rotate_deg(90.0);
        let mid = blend(&Value::Transform(from), &Value::Transform(to), 0.5)
            .unwrap()
            .as_matrix()
            .unwrap();
        let parts = mid.decompose();
        assert!(approx_eq(parts.angle, 45.0f64.to_radians()));
        // A raw entry blend would shrink the scale to ~0.707
        assert!(approx_eq(parts.scale_x, 1.0));
        assert!(approx_eq(parts.scale_y, 1.0));
    }

    #[test]
    fn test_blend_matrix_endpoints_exact() {
        let from = Matrix::translate(3.0, 4.0);
        let to = Matrix::translate(10.0, 0.0).then(&Matrix::scale(2.0, 2.0));
        let end = blend(&Value::Transform(from), &Value::Transform(to), 1.0).unwrap();
        assert_eq!(end, Value::Transform(to));
    }

    #[test]
    fn test_blend_sequences() {
        let from = Value::Sequence(vec![Value::Number(0.0), Value::Color(Rgba::BLACK)]);
        let to = Value::Sequence(vec![Value::Number(2.0), Value::Color(Rgba::WHITE)]);
        let mid = blend(&from, &to, 0.5).unwrap();
        assert_eq!(
            mid,
            Value::Sequence(vec![
                Value::Number(1.0),
                Value::Color(Rgba::new(127.5, 127.5, 127.5, 1.0)),
            ])
        );
    }

    #[test]
    fn test_blend_rejects_mixed_shapes() {
        let err = blend(&Value::Number(1.0), &Value::Color(Rgba::BLACK), 0.5).unwrap_err();
        assert_eq!(
            err,
            AnimError::UnsupportedBlend {
                from: "number",
                to: "color"
            }
        );

        let err = blend(
            &Value::Sequence(vec![Value::Number(1.0)]),
            &Value::Sequence(vec![]),
            0.5,
        )
        .unwrap_err();
        assert_eq!(err, AnimError::SequenceLength { from: 1, to: 0 });
    }
}
