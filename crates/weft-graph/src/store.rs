//! The mutable graph store with transactional op recording.

use crate::element::{GraphLink, GraphNode};
use crate::error::{GraphError, Result};
use crate::ops::{Op, OpRecord};

/// Ordered nodes and links of the authoritative graph.
///
/// Order is render order. Mutations made while a transaction is open are
/// recorded; [`Clone`] produces a snapshot without the open record.
#[derive(Debug, Default)]
pub struct GraphStruct {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    recorder: Option<OpRecord>,
}

impl Clone for GraphStruct {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            links: self.links.clone(),
            recorder: None,
        }
    }
}

impl PartialEq for GraphStruct {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.links == other.links
    }
}

impl GraphStruct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&GraphLink> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn link_index(&self, id: &str) -> Option<usize> {
        self.links.iter().position(|l| l.id == id)
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    pub fn add_node(&mut self, node: GraphNode) -> Result<()> {
        let index = self.nodes.len();
        self.insert_node(index, node)
    }

    /// Insert at `index`; fails when `index > len`.
    pub fn insert_node(&mut self, index: usize, node: GraphNode) -> Result<()> {
        self.apply(Op::InsertNode { index, node }).map(drop)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<GraphNode> {
        let node = self
            .node(id)
            .cloned()
            .ok_or_else(|| GraphError::MissingNode(id.to_string()))?;
        self.apply(Op::RemoveNode { id: id.to_string() })?;
        Ok(node)
    }

    /// Replace the node with the same id, returning the old one.
    pub fn replace_node(&mut self, node: GraphNode) -> Result<GraphNode> {
        let old = self
            .node(&node.id)
            .cloned()
            .ok_or_else(|| GraphError::MissingNode(node.id.clone()))?;
        self.apply(Op::ReplaceNode { node })?;
        Ok(old)
    }

    /// Edit a node in place. The id cannot be changed this way.
    pub fn update_node(&mut self, id: &str, edit: impl FnOnce(&mut GraphNode)) -> Result<()> {
        let mut node = self
            .node(id)
            .cloned()
            .ok_or_else(|| GraphError::MissingNode(id.to_string()))?;
        edit(&mut node);
        node.id = id.to_string();
        self.apply(Op::ReplaceNode { node }).map(drop)
    }

    pub fn swap_nodes(&mut self, a: usize, b: usize) -> Result<()> {
        self.apply(Op::SwapNodes { a, b }).map(drop)
    }

    pub fn move_node(&mut self, from: usize, to: usize) -> Result<()> {
        self.apply(Op::MoveNode { from, to }).map(drop)
    }

    // ========================================================================
    // Links
    // ========================================================================

    /// Link `from -> to`. Returns `None` if that link already exists.
    pub fn add_link(&mut self, from: &str, to: &str) -> Result<Option<String>> {
        for id in [from, to] {
            if self.node(id).is_none() {
                return Err(GraphError::MissingNode(id.to_string()));
            }
        }
        if self
            .links
            .iter()
            .any(|l| l.from_id() == from && l.to_id() == to)
        {
            return Ok(None);
        }
        let link = GraphLink::new(from, to);
        let id = link.id.clone();
        self.push_link(link)?;
        Ok(Some(id))
    }

    pub fn push_link(&mut self, link: GraphLink) -> Result<()> {
        let index = self.links.len();
        self.insert_link(index, link)
    }

    pub fn insert_link(&mut self, index: usize, link: GraphLink) -> Result<()> {
        self.apply(Op::InsertLink { index, link }).map(drop)
    }

    pub fn remove_link(&mut self, id: &str) -> Result<GraphLink> {
        let link = self
            .link(id)
            .cloned()
            .ok_or_else(|| GraphError::MissingLink(id.to_string()))?;
        self.apply(Op::RemoveLink { id: id.to_string() })?;
        Ok(link)
    }

    pub fn replace_link(&mut self, link: GraphLink) -> Result<GraphLink> {
        let old = self
            .link(&link.id)
            .cloned()
            .ok_or_else(|| GraphError::MissingLink(link.id.clone()))?;
        self.apply(Op::ReplaceLink { link })?;
        Ok(old)
    }

    pub fn update_link(&mut self, id: &str, edit: impl FnOnce(&mut GraphLink)) -> Result<()> {
        let mut link = self
            .link(id)
            .cloned()
            .ok_or_else(|| GraphError::MissingLink(id.to_string()))?;
        edit(&mut link);
        link.id = id.to_string();
        self.apply(Op::ReplaceLink { link }).map(drop)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Nodes with a link pointing at `id`.
    pub fn parents(&self, id: &str) -> Vec<&GraphNode> {
        self.links
            .iter()
            .filter(|l| l.to_id() == id)
            .filter_map(|l| self.node(l.from_id()))
            .collect()
    }

    /// Nodes `id` links to.
    pub fn children(&self, id: &str) -> Vec<&GraphNode> {
        self.links
            .iter()
            .filter(|l| l.from_id() == id)
            .filter_map(|l| self.node(l.to_id()))
            .collect()
    }

    /// Outgoing links of `id`.
    pub fn node_links(&self, id: &str) -> Vec<&GraphLink> {
        self.links.iter().filter(|l| l.from_id() == id).collect()
    }

    /// Outgoing then incoming links of `id`.
    pub fn related_links(&self, id: &str) -> Vec<&GraphLink> {
        let mut links = self.node_links(id);
        links.extend(self.links.iter().filter(|l| l.to_id() == id));
        links
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Run `mutate` and return the ops it performed.
    ///
    /// If `mutate` fails, every op it performed is reverted, newest first,
    /// before the error is returned. Nested transactions roll back only
    /// their own ops and contribute them to the outer record on success.
    pub fn transaction<E>(
        &mut self,
        mutate: impl FnOnce(&mut Self) -> std::result::Result<(), E>,
    ) -> std::result::Result<OpRecord, E> {
        let nested = self.recorder.is_some();
        let start = self.recorder.as_ref().map_or(0, OpRecord::len);
        if !nested {
            self.recorder = Some(OpRecord::new());
        }

        let result = mutate(self);

        let mut record = self.recorder.take().unwrap_or_default();
        let own = record.split_off(start);
        if nested {
            self.recorder = Some(record);
        }

        match result {
            Ok(()) => {
                if let Some(outer) = self.recorder.as_mut() {
                    outer.extend(&own);
                }
                Ok(own)
            }
            Err(err) => {
                tracing::debug!(ops = own.len(), "rolling back transaction");
                self.rollback(&own);
                Err(err)
            }
        }
    }

    fn rollback(&mut self, record: &OpRecord) {
        let saved = self.recorder.take();
        for op in record.undo_ops() {
            if let Err(err) = self.execute(op.clone()) {
                tracing::warn!(%err, ?op, "rollback step failed");
            }
        }
        self.recorder = saved;
    }

    /// Execute `op`, recording it if a transaction is open. Returns its inverse.
    pub fn apply(&mut self, op: Op) -> Result<Op> {
        let inverse = self.execute(op.clone())?;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.push(op, inverse.clone());
        }
        Ok(inverse)
    }

    fn execute(&mut self, op: Op) -> Result<Op> {
        match op {
            Op::InsertNode { index, node } => {
                check_insert(index, self.nodes.len())?;
                if self.node(&node.id).is_some() {
                    return Err(GraphError::DuplicateId(node.id));
                }
                let id = node.id.clone();
                self.nodes.insert(index, node);
                Ok(Op::RemoveNode { id })
            }
            Op::RemoveNode { id } => {
                let index = self
                    .node_index(&id)
                    .ok_or_else(|| GraphError::MissingNode(id.clone()))?;
                let node = self.nodes.remove(index);
                Ok(Op::InsertNode { index, node })
            }
            Op::ReplaceNode { node } => {
                let index = self
                    .node_index(&node.id)
                    .ok_or_else(|| GraphError::MissingNode(node.id.clone()))?;
                let old = std::mem::replace(&mut self.nodes[index], node);
                Ok(Op::ReplaceNode { node: old })
            }
            Op::SwapNodes { a, b } => {
                check_index(a, self.nodes.len())?;
                check_index(b, self.nodes.len())?;
                self.nodes.swap(a, b);
                Ok(Op::SwapNodes { a, b })
            }
            Op::MoveNode { from, to } => {
                check_index(from, self.nodes.len())?;
                check_index(to, self.nodes.len())?;
                let node = self.nodes.remove(from);
                self.nodes.insert(to, node);
                Ok(Op::MoveNode { from: to, to: from })
            }
            Op::InsertLink { index, link } => {
                check_insert(index, self.links.len())?;
                if self.link(&link.id).is_some() {
                    return Err(GraphError::DuplicateId(link.id));
                }
                let id = link.id.clone();
                self.links.insert(index, link);
                Ok(Op::RemoveLink { id })
            }
            Op::RemoveLink { id } => {
                let index = self
                    .link_index(&id)
                    .ok_or_else(|| GraphError::MissingLink(id.clone()))?;
                let link = self.links.remove(index);
                Ok(Op::InsertLink { index, link })
            }
            Op::ReplaceLink { link } => {
                let index = self
                    .link_index(&link.id)
                    .ok_or_else(|| GraphError::MissingLink(link.id.clone()))?;
                let old = std::mem::replace(&mut self.links[index], link);
                Ok(Op::ReplaceLink { link: old })
            }
        }
    }
}

fn check_insert(index: usize, len: usize) -> Result<()> {
    if index > len {
        return Err(GraphError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(GraphError::IndexOutOfBounds { index, len });
    }
    Ok(())
}
