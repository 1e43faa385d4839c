//! Animatable values and property names.
//!
//! The value domain is closed: every animatable property holds a
//! [`Value`], which is a number, a color, an affine matrix, or a sequence of
//! those. Blending two values of different shapes is an error (see
//! [`crate::interpolate::blend`]).
//!
//! # Wire format
//!
//! Values are untagged on the wire:
//!
//! ```text
//! 0.5                      -> Value::Number
//! "#ff0000" / "rgba(..)"   -> Value::Color
//! [1, 0, 0, 1, 10, 20]     -> Value::Transform  (a, b, c, d, tx, ty)
//! [0, "#fff"]              -> Value::Sequence
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::AnimError;
use crate::transform::Matrix;

/// Animatable property of a render element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    X,
    Y,
    OffsetX,
    OffsetY,
    Width,
    Height,
    Opacity,
    Color,
    BackgroundColor,
    Matrix,
}

impl Property {
    /// Every property, in update-diff order.
    pub const ALL: [Property; 10] = [
        Property::X,
        Property::Y,
        Property::OffsetX,
        Property::OffsetY,
        Property::Width,
        Property::Height,
        Property::Opacity,
        Property::Color,
        Property::BackgroundColor,
        Property::Matrix,
    ];

    /// Wire name of the property.
    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::OffsetX => "offsetX",
            Property::OffsetY => "offsetY",
            Property::Width => "width",
            Property::Height => "height",
            Property::Opacity => "opacity",
            Property::Color => "color",
            Property::BackgroundColor => "backgroundColor",
            Property::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Partial map of property values, as written in transition configs.
pub type PropertyMap = BTreeMap<Property, Value>;

/// An RGBA color. Channels `r`, `g`, `b` are in `0..=255`, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(255.0, 255.0, 255.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any CSS color string.
    pub fn parse(input: &str) -> Result<Self, AnimError> {
        let color = csscolorparser::parse(input).map_err(|e| AnimError::InvalidColor {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        // csscolorparser normalizes to 0..1; round off the division noise
        let channel = |v: f64| (v * 255.0 * 1e6).round() / 1e6;
        Ok(Self {
            r: channel(color.r),
            g: channel(color.g),
            b: channel(color.b),
            a: (color.a * 1e6).round() / 1e6,
        })
    }

    /// Channel-wise linear blend.
    pub fn lerp(&self, to: &Rgba, t: f64) -> Rgba {
        Rgba {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
            a: lerp(self.a, to.a, t),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Rgba {
    type Error = AnimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// A value that can be animated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Color(Rgba),
    Transform(Matrix),
    Sequence(Vec<Value>),
}

impl Value {
    /// Shape name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Color(_) => "color",
            Value::Transform(_) => "transform",
            Value::Sequence(_) => "sequence",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<Matrix> {
        match self {
            Value::Transform(m) => Some(*m),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<Rgba> for Value {
    fn from(value: Rgba) -> Self {
        Value::Color(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Value::Transform(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Color(c) => write!(f, "{c}"),
            Value::Transform(m) => write!(f, "{m}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[inline]
pub(crate) fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

static_assertions::assert_impl_all!(Value: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_named() {
        assert_eq!(Rgba::parse("#fff").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse("black").unwrap(), Rgba::BLACK);
        let red = Rgba::parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(red, Rgba::new(255.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_parse_invalid_color() {
        assert!(matches!(
            Rgba::parse("not-a-color"),
            Err(AnimError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Rgba::new(127.5, 127.5, 127.5, 1.0).to_string(), "rgba(127.5,127.5,127.5,1)");
        assert_eq!(Rgba::WHITE.to_string(), "rgba(255,255,255,1)");
    }

    #[test]
    fn test_value_wire_format() {
        let number: Value = serde_json::from_str("0.25").unwrap();
        assert_eq!(number, Value::Number(0.25));

        let color: Value = serde_json::from_str("\"#000\"").unwrap();
        assert_eq!(color, Value::Color(Rgba::BLACK));

        let matrix: Value = serde_json::from_str("[1, 0, 0, 1, 10, 20]").unwrap();
        assert_eq!(matrix, Value::Transform(Matrix::translate(10.0, 20.0)));

        let seq: Value = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(seq, Value::Sequence(vec![Value::Number(1.0), Value::Number(2.0)]));
    }

    #[test]
    fn test_property_wire_names() {
        let p: Property = serde_json::from_str("\"backgroundColor\"").unwrap();
        assert_eq!(p, Property::BackgroundColor);
        assert_eq!(Property::OffsetX.to_string(), "offsetX");
    }
}
