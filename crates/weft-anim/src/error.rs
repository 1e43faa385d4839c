use thiserror::Error;

use crate::value::Property;

/// Errors raised while blending values or writing them onto elements.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimError {
    #[error("cannot blend {from} into {to}")]
    UnsupportedBlend { from: &'static str, to: &'static str },

    #[error("cannot blend sequences of different length ({from} vs {to})")]
    SequenceLength { from: usize, to: usize },

    #[error("keyframe track has no frames")]
    EmptyKeyframes,

    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },

    #[error("property {property} expects a {expected} value, got {found}")]
    PropertyType {
        property: Property,
        expected: &'static str,
        found: &'static str,
    },
}
