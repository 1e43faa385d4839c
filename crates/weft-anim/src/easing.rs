//! Easing curves for tween timing.
//!
//! The CSS keyword curves plus arbitrary cubic beziers:
//! - `linear`
//! - `ease`, `ease-in`, `ease-out`, `ease-in-out`
//! - `{"cubic-bezier": {"x1": .., "y1": .., "x2": .., "y2": ..}}`
//!
//! # Usage
//!
//! ```
//! use weft_anim::easing::Easing;
//!
//! let eased = Easing::EaseIn.evaluate(0.5);
//! assert!(eased < 0.5);
//! ```

use serde::{Deserialize, Serialize};

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    /// `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    Ease,
    /// `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve; x control values must lie in `[0, 1]`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Evaluate at `t`. Input is clamped; the ends map to exactly 0 and 1.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                cubic_bezier(x1.clamp(0.0, 1.0), *y1, x2.clamp(0.0, 1.0), *y2, t)
            }
        }
    }

    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }
}

/// Evaluate a cubic bezier timing curve at `progress`.
///
/// Newton-Raphson finds the curve parameter whose x matches `progress`,
/// then the y coordinate at that parameter is returned.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < 1e-7 {
            break;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-7 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }
    t
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

/// B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 0.001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = Easing::Linear;
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(0.75), 0.75));
    }

    #[test]
    fn test_keyword_boundaries_exact() {
        for ease in [
            Easing::Linear,
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(ease.evaluate(0.0), 0.0);
            assert_eq!(ease.evaluate(1.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_and_out() {
        assert!(Easing::EaseIn.evaluate(0.25) < 0.25);
        assert!(Easing::EaseOut.evaluate(0.25) > 0.25);
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let ease = Easing::EaseInOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn test_custom_bezier_linear_equivalent() {
        let ease = Easing::cubic_bezier(0.0, 0.0, 1.0, 1.0);
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Easing::Ease.evaluate(-0.5), 0.0);
        assert_eq!(Easing::Ease.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_wire_names() {
        let e: Easing = serde_json::from_str("\"ease-in-out\"").unwrap();
        assert_eq!(e, Easing::EaseInOut);
        let custom: Easing =
            serde_json::from_str(r#"{"cubic-bezier": {"x1": 0.4, "y1": 0, "x2": 0.2, "y2": 1}}"#)
                .unwrap();
        assert_eq!(custom, Easing::cubic_bezier(0.4, 0.0, 0.2, 1.0));
    }
}
