//! The authoritative logical graph.
//!
//! Applications mutate a [`GraphStruct`] (ideally inside
//! [`GraphStruct::transaction`]) and hand clones of it to the renderer as
//! new roots. Every mutation is recorded as an [`Op`] with its inverse, so
//! a failed transaction rolls back cleanly and a finished one can be
//! undone or redone.
//!
//! # Example
//!
//! ```ignore
//! use weft_graph::{GraphNode, GraphStruct};
//!
//! let mut graph = GraphStruct::new();
//! let record = graph.transaction(|g| {
//!     g.add_node(GraphNode::new().with_height(60.0))?;
//!     Ok::<_, weft_graph::GraphError>(())
//! })?;
//! record.undo(&mut graph)?;
//! ```

pub mod element;
pub mod error;
pub mod ops;
pub mod store;

pub use element::{Geometry, GraphLink, GraphNode};
pub use error::{GraphError, Result};
pub use ops::{Op, OpRecord};
pub use store::GraphStruct;
