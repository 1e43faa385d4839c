//! Error types for the logical graph store.

use thiserror::Error;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph CRUD operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Insert or move target past the end of a collection.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("node not found: {0}")]
    MissingNode(String),

    #[error("link not found: {0}")]
    MissingLink(String),

    /// An element with this id is already present.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}
