//! Structural diff between the committed root and a freshly computed one.
//!
//! Elements are matched by id. A removed element keeps rendering only if it
//! has leave animations; its [`Slot`] says how it re-enters the new list:
//! spliced back at a tracked position, or chained behind the new element
//! that took its old index in the same frame.

use std::collections::HashSet;
use std::rc::Rc;

use crate::render_graph::{ElementList, RenderElement, RenderGraph, RenderLink, RenderNode};

/// Where a removed element goes while it plays its leave animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Reinsert at this index of the new list.
    Splice(usize),
    /// Hand off to the newly added element now at the old index.
    Chain { successor: String },
    /// No leave animation: gone immediately.
    Drop,
}

#[derive(Debug, Clone)]
pub struct Removal<E> {
    /// The element as it was last presented.
    pub element: Rc<E>,
    pub slot: Slot,
}

/// Diff of one element list.
///
/// `adds` and `updates` name elements of the new list by id, so they can be
/// looked up after layout has moved them.
#[derive(Debug, Clone)]
pub struct ListMutation<E> {
    pub adds: Vec<String>,
    /// Old elements matched by id in the new list.
    pub updates: Vec<Rc<E>>,
    pub removes: Vec<Removal<E>>,
}

impl<E> Default for ListMutation<E> {
    fn default() -> Self {
        Self {
            adds: Vec::new(),
            updates: Vec::new(),
            removes: Vec::new(),
        }
    }
}

impl<E: RenderElement> ListMutation<E> {
    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.updates.is_empty() && self.removes.is_empty()
    }

    /// `(older, newer)` pairs of the updates, resolved against `newer`.
    pub fn pairs<'a>(&'a self, newer: &'a ElementList<E>) -> impl Iterator<Item = (&'a E, &'a E)> {
        self.updates
            .iter()
            .filter_map(move |older| newer.get(older.id()).map(|n| (older.as_ref(), n)))
    }
}

pub fn diff_list<E: RenderElement>(older: &ElementList<E>, newer: &ElementList<E>) -> ListMutation<E> {
    let old_ids: HashSet<&str> = older.items().iter().map(|e| e.id()).collect();
    let new_ids: HashSet<&str> = newer.items().iter().map(|e| e.id()).collect();
    let mut mutation = ListMutation::default();

    for element in newer.items() {
        if !old_ids.contains(element.id()) {
            mutation.adds.push(element.id().to_string());
        }
    }

    let mut pos = 0;
    for (index, element) in older.items().iter().enumerate() {
        if new_ids.contains(element.id()) {
            mutation.updates.push(element.clone());
            pos += 1;
            continue;
        }
        let leaves = element.has_leave_animations();
        let replacement = newer
            .items()
            .get(index)
            .filter(|n| !old_ids.contains(n.id()));
        let slot = match replacement {
            Some(occupant) => {
                pos += 1;
                if leaves {
                    Slot::Chain {
                        successor: occupant.id().to_string(),
                    }
                } else {
                    Slot::Drop
                }
            }
            None if leaves => {
                let slot = Slot::Splice(pos);
                pos += 1;
                slot
            }
            None => Slot::Drop,
        };
        mutation.removes.push(Removal {
            element: element.clone(),
            slot,
        });
    }

    mutation
}

#[derive(Debug, Clone, Default)]
pub struct GraphMutation {
    pub nodes: ListMutation<RenderNode>,
    pub links: ListMutation<RenderLink>,
}

impl GraphMutation {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

pub fn diff_graph(older: &RenderGraph, newer: &RenderGraph) -> GraphMutation {
    GraphMutation {
        nodes: diff_list(&older.nodes, &newer.nodes),
        links: diff_list(&older.links, &newer.links),
    }
}

/// Put removed elements with leave animations back into `root`.
pub fn prepare_removals<E: RenderElement>(list: &mut ElementList<E>, mutation: &ListMutation<E>) {
    for removal in &mutation.removes {
        match &removal.slot {
            Slot::Splice(pos) => {
                list.insert(*pos, removal.element.clone());
                list.mark_leaving(removal.element.id());
            }
            Slot::Chain { successor } => list.chain_departing(removal.element.clone(), successor),
            Slot::Drop => list.unlink(removal.element.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_anim::{Property, TransitionConfig, Trigger};
    use weft_graph::{GraphNode, GraphStruct};

    fn leaving(id: &str) -> GraphNode {
        GraphNode::with_id(id)
            .with_transition(Trigger::Leave, [TransitionConfig::new(300.0).to(Property::Opacity, 0.0)])
    }

    fn root(nodes: Vec<GraphNode>) -> RenderGraph {
        let mut graph = GraphStruct::new();
        for node in nodes {
            graph.add_node(node).unwrap();
        }
        RenderGraph::from_graph(&graph)
    }

    fn slots(mutation: &ListMutation<RenderNode>) -> Vec<(String, Slot)> {
        mutation
            .removes
            .iter()
            .map(|r| (r.element.id().to_string(), r.slot.clone()))
            .collect()
    }

    #[test]
    fn test_identical_graphs() {
        let old = root(vec![GraphNode::with_id("a"), GraphNode::with_id("b")]);
        let new = old.snapshot();
        let mutation = diff_graph(&old, &new);
        assert!(mutation.nodes.adds.is_empty());
        assert!(mutation.nodes.removes.is_empty());
        assert_eq!(mutation.nodes.updates.len(), 2);
        for (older, newer) in mutation.nodes.pairs(&new.nodes) {
            assert_eq!(older, newer);
        }
    }

    #[test]
    fn test_removal_without_leave_is_dropped() {
        let old = root(vec![GraphNode::with_id("a"), GraphNode::with_id("b")]);
        let new = root(vec![GraphNode::with_id("a")]);
        let mutation = diff_list(&old.nodes, &new.nodes);
        assert_eq!(slots(&mutation), vec![("b".to_string(), Slot::Drop)]);
    }

    #[test]
    fn test_removal_with_leave_is_spliced() {
        let old = root(vec![GraphNode::with_id("a"), leaving("b"), GraphNode::with_id("c")]);
        let new = root(vec![GraphNode::with_id("a"), GraphNode::with_id("c")]);
        let mutation = diff_list(&old.nodes, &new.nodes);
        assert_eq!(slots(&mutation), vec![("b".to_string(), Slot::Splice(1))]);

        let mut list = new.nodes.clone();
        prepare_removals(&mut list, &mutation);
        let ids: Vec<_> = list.iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_same_slot_replacement_chains() {
        let old = root(vec![leaving("b"), GraphNode::with_id("x")]);
        let new = root(vec![GraphNode::with_id("c"), GraphNode::with_id("x")]);
        let mutation = diff_list(&old.nodes, &new.nodes);
        assert_eq!(mutation.adds, vec!["c"]);
        assert_eq!(
            slots(&mutation),
            vec![("b".to_string(), Slot::Chain { successor: "c".into() })]
        );

        let mut list = new.nodes.clone();
        prepare_removals(&mut list, &mutation);
        assert_eq!(list.len(), 2);
        assert!(list.is_departing("b"));
        assert_eq!(list.successor("b"), Some("c"));
    }

    #[test]
    fn test_replacement_advances_splice_position() {
        let old = root(vec![GraphNode::with_id("a"), leaving("b"), leaving("d")]);
        let new = root(vec![GraphNode::with_id("c"), GraphNode::with_id("b2")]);
        let mutation = diff_list(&old.nodes, &new.nodes);
        assert_eq!(
            slots(&mutation),
            vec![
                ("a".to_string(), Slot::Drop),
                ("b".to_string(), Slot::Chain { successor: "b2".into() }),
                ("d".to_string(), Slot::Splice(2)),
            ]
        );
    }
}
