//! Recorded graph mutations.

use crate::element::{GraphLink, GraphNode};
use crate::error::Result;
use crate::store::GraphStruct;

/// A single reversible mutation of a [`GraphStruct`].
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    InsertNode { index: usize, node: GraphNode },
    RemoveNode { id: String },
    /// Replace the node carrying the same id.
    ReplaceNode { node: GraphNode },
    SwapNodes { a: usize, b: usize },
    MoveNode { from: usize, to: usize },
    InsertLink { index: usize, link: GraphLink },
    RemoveLink { id: String },
    ReplaceLink { link: GraphLink },
}

/// Ops executed by one transaction, each paired with its inverse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpRecord {
    entries: Vec<(Op, Op)>,
}

impl OpRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, exec: Op, undo: Op) {
        self.entries.push((exec, undo));
    }

    /// Detach the entries recorded from `start` on.
    pub(crate) fn split_off(&mut self, start: usize) -> OpRecord {
        let start = start.min(self.entries.len());
        OpRecord {
            entries: self.entries.split_off(start),
        }
    }

    pub(crate) fn extend(&mut self, other: &OpRecord) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn exec_ops(&self) -> impl Iterator<Item = &Op> {
        self.entries.iter().map(|(exec, _)| exec)
    }

    /// Inverse ops in the order they must be applied.
    pub fn undo_ops(&self) -> impl Iterator<Item = &Op> {
        self.entries.iter().rev().map(|(_, undo)| undo)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Revert the record on `graph`, newest op first.
    pub fn undo(&self, graph: &mut GraphStruct) -> Result<()> {
        for op in self.undo_ops() {
            graph.apply(op.clone())?;
        }
        Ok(())
    }

    /// Re-apply the record on `graph`.
    pub fn redo(&self, graph: &mut GraphStruct) -> Result<()> {
        for op in self.exec_ops() {
            graph.apply(op.clone())?;
        }
        Ok(())
    }
}
