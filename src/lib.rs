//! Weft: animated reconciliation of node/link graphs.
//!
//! Re-exports the workspace crates under one roof:
//! - [`anim`]: values, interpolation, tweens, timelines
//! - [`graph`]: the authoritative logical graph store
//! - [`render`]: render graph, differ, resolver and frame pipeline
//! - [`config`]: `weft.toml` configuration

pub use weft_anim as anim;
pub use weft_config as config;
pub use weft_graph as graph;
pub use weft_render as render;

/// Result alias used by applications built on weft.
pub type Result<T> = anyhow::Result<T>;
