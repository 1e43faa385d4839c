//! The render graph: the animatable projection of a logical graph.
//!
//! A [`RenderGraph`] holds two [`ElementList`]s, one of nodes and one of
//! links. Every element carries two property sets:
//! - `base`: the settled values, from the logical graph and layout
//! - `props`: the presented values, which tweens write into
//!
//! Elements live behind `Rc` and are mutated copy-on-write, so cloning a
//! graph is cheap and never aliases an element that is later changed.
//!
//! # Hand-off chain
//!
//! An element that was removed but still plays a leave animation is either
//! spliced back into the list (it keeps its slot) or, when a new element
//! took its slot in the same frame, moved to the list's *departing* table and
//! chained to that new element:
//!
//! ```text
//! departing B --successor--> C (list member)
//! C --predecessor--> B
//! ```
//!
//! Departing elements are painted just before the element they hand off to.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use weft_anim::{
    AnimError, ElementKind, Matrix, Mutator, NodeAnimation, NodeTransition, Property, Rgba,
    TweenTarget, Value, has_leave_animations,
};
use weft_graph::{GraphLink, GraphNode, GraphStruct};

use crate::rect::Rect;

// ============================================================================
// Properties
// ============================================================================

/// Animatable values of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Props {
    pub x: f64,
    pub y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub color: Rgba,
    pub background_color: Rgba,
    pub matrix: Matrix,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: 0.0,
            height: 0.0,
            opacity: 1.0,
            color: Rgba::BLACK,
            background_color: Rgba::WHITE,
            matrix: Matrix::identity(),
        }
    }
}

fn number(property: Property, value: &Value) -> Result<f64, AnimError> {
    value.as_number().ok_or(AnimError::PropertyType {
        property,
        expected: "number",
        found: value.kind(),
    })
}

fn color(property: Property, value: &Value) -> Result<Rgba, AnimError> {
    value.as_color().ok_or(AnimError::PropertyType {
        property,
        expected: "color",
        found: value.kind(),
    })
}

impl Props {
    pub fn get(&self, property: Property) -> Value {
        match property {
            Property::X => Value::Number(self.x),
            Property::Y => Value::Number(self.y),
            Property::OffsetX => Value::Number(self.offset_x),
            Property::OffsetY => Value::Number(self.offset_y),
            Property::Width => Value::Number(self.width),
            Property::Height => Value::Number(self.height),
            Property::Opacity => Value::Number(self.opacity),
            Property::Color => Value::Color(self.color),
            Property::BackgroundColor => Value::Color(self.background_color),
            Property::Matrix => Value::Transform(self.matrix),
        }
    }

    /// Write `value`; fails if its shape does not fit the property.
    pub fn set(&mut self, property: Property, value: &Value) -> Result<(), AnimError> {
        match property {
            Property::X => self.x = number(property, value)?,
            Property::Y => self.y = number(property, value)?,
            Property::OffsetX => self.offset_x = number(property, value)?,
            Property::OffsetY => self.offset_y = number(property, value)?,
            Property::Width => self.width = number(property, value)?,
            Property::Height => self.height = number(property, value)?,
            Property::Opacity => self.opacity = number(property, value)?,
            Property::Color => self.color = color(property, value)?,
            Property::BackgroundColor => self.background_color = color(property, value)?,
            Property::Matrix => {
                self.matrix = value.as_matrix().ok_or(AnimError::PropertyType {
                    property,
                    expected: "transform",
                    found: value.kind(),
                })?
            }
        }
        Ok(())
    }

    /// Bounding rect, offsets included.
    pub fn rect(&self) -> Rect {
        Rect::from_xywh(
            self.x + self.offset_x,
            self.y + self.offset_y,
            self.width,
            self.height,
        )
    }
}

// ============================================================================
// Elements
// ============================================================================

/// Shared behavior of render nodes and links.
pub trait RenderElement: Clone + std::fmt::Debug {
    const KIND: ElementKind;

    fn id(&self) -> &str;
    /// Presented values.
    fn props(&self) -> &Props;
    fn props_mut(&mut self) -> &mut Props;
    /// Settled values.
    fn base(&self) -> &Props;
    fn base_mut(&mut self) -> &mut Props;
    fn transitions(&self) -> &[NodeTransition];
    fn animations(&self) -> &[NodeAnimation];
    /// Leave tweens started and not yet ended.
    fn active_animations(&self) -> u32;
    fn set_active_animations(&mut self, count: u32);

    fn target(&self) -> TweenTarget {
        TweenTarget {
            kind: Self::KIND,
            id: self.id().to_string(),
        }
    }

    fn has_leave_animations(&self) -> bool {
        has_leave_animations(self.transitions(), self.animations())
    }

    fn rect(&self) -> Rect {
        self.props().rect()
    }

    /// Adopt the presented values as settled.
    fn settle(&mut self) {
        let props = self.props().clone();
        *self.base_mut() = props;
    }

    /// Drop presented values back to the settled ones.
    fn reset(&mut self) {
        let base = self.base().clone();
        *self.props_mut() = base;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    id: String,
    props: Props,
    base: Props,
    transitions: Rc<[NodeTransition]>,
    animations: Rc<[NodeAnimation]>,
    active_animations: u32,
}

impl RenderNode {
    pub fn from_graph(node: &GraphNode) -> Self {
        let props = Props {
            x: node.x,
            y: node.y,
            offset_x: node.offset_x,
            offset_y: node.offset_y,
            width: node.width.unwrap_or(0.0),
            height: node.height.unwrap_or(0.0),
            opacity: node.opacity,
            color: node.color,
            background_color: node.background_color,
            matrix: node.matrix,
        };
        Self {
            id: node.id.clone(),
            base: props.clone(),
            props,
            transitions: Rc::from(node.transitions.clone()),
            animations: Rc::from(node.animations.clone()),
            active_animations: 0,
        }
    }
}

impl RenderElement for RenderNode {
    const KIND: ElementKind = ElementKind::Node;

    fn id(&self) -> &str {
        &self.id
    }
    fn props(&self) -> &Props {
        &self.props
    }
    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }
    fn base(&self) -> &Props {
        &self.base
    }
    fn base_mut(&mut self) -> &mut Props {
        &mut self.base
    }
    fn transitions(&self) -> &[NodeTransition] {
        &self.transitions
    }
    fn animations(&self) -> &[NodeAnimation] {
        &self.animations
    }
    fn active_animations(&self) -> u32 {
        self.active_animations
    }
    fn set_active_animations(&mut self, count: u32) {
        self.active_animations = count;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLink {
    id: String,
    ends: [String; 2],
    props: Props,
    base: Props,
    transitions: Rc<[NodeTransition]>,
    animations: Rc<[NodeAnimation]>,
    active_animations: u32,
    /// Geometry follows the endpoints.
    routed: bool,
}

impl RenderLink {
    pub fn from_graph(link: &GraphLink) -> Self {
        let mut props = Props {
            opacity: link.opacity,
            color: link.color,
            background_color: link.background_color,
            matrix: link.matrix,
            ..Props::default()
        };
        if let Some(geometry) = link.geometry {
            props.x = geometry.x;
            props.y = geometry.y;
            props.width = geometry.width;
            props.height = geometry.height;
        }
        Self {
            id: link.id.clone(),
            ends: link.ends.clone(),
            base: props.clone(),
            props,
            transitions: Rc::from(link.transitions.clone()),
            animations: Rc::from(link.animations.clone()),
            active_animations: 0,
            routed: link.geometry.is_none(),
        }
    }

    pub fn from_id(&self) -> &str {
        &self.ends[0]
    }

    pub fn to_id(&self) -> &str {
        &self.ends[1]
    }

    pub fn is_routed(&self) -> bool {
        self.routed
    }
}

impl RenderElement for RenderLink {
    const KIND: ElementKind = ElementKind::Link;

    fn id(&self) -> &str {
        &self.id
    }
    fn props(&self) -> &Props {
        &self.props
    }
    fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }
    fn base(&self) -> &Props {
        &self.base
    }
    fn base_mut(&mut self) -> &mut Props {
        &mut self.base
    }
    fn transitions(&self) -> &[NodeTransition] {
        &self.transitions
    }
    fn animations(&self) -> &[NodeAnimation] {
        &self.animations
    }
    fn active_animations(&self) -> u32 {
        self.active_animations
    }
    fn set_active_animations(&mut self, count: u32) {
        self.active_animations = count;
    }
}

// ============================================================================
// Element lists
// ============================================================================

/// Neighbours of an element in the hand-off chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainLink {
    /// The departing element handing off to this one.
    pub predecessor: Option<String>,
    /// The element taking over this one's slot.
    pub successor: Option<String>,
}

impl ChainLink {
    fn is_empty(&self) -> bool {
        self.predecessor.is_none() && self.successor.is_none()
    }
}

/// Ordered elements plus the departing table and hand-off chain.
///
/// Positions used as mutator slots index the list members first, then the
/// departing elements. `slots` maps every id to that position and is
/// rebuilt after each structural change.
#[derive(Debug, Clone)]
pub struct ElementList<E> {
    items: Vec<Rc<E>>,
    departing: Vec<Rc<E>>,
    chain: HashMap<String, ChainLink>,
    slots: HashMap<String, usize>,
    /// Logically removed ids still rendered for their leave animations.
    leaving: HashSet<String>,
}

impl<E> Default for ElementList<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            departing: Vec::new(),
            chain: HashMap::new(),
            slots: HashMap::new(),
            leaving: HashSet::new(),
        }
    }
}

impl<E: RenderElement> ElementList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// List members in order; departing elements are not included.
    pub fn items(&self) -> &[Rc<E>] {
        &self.items
    }

    pub fn departing(&self) -> &[Rc<E>] {
        &self.departing
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.items.iter().map(|e| e.as_ref())
    }

    /// Members and departing elements.
    pub fn all(&self) -> impl Iterator<Item = &Rc<E>> {
        self.items.iter().chain(self.departing.iter())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied().filter(|&i| i < self.items.len())
    }

    /// Member or departing element with `id`.
    pub fn get(&self, id: &str) -> Option<&E> {
        let index = self.index_of(id)?;
        self.at(index).map(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut E> {
        let index = self.index_of(id)?;
        self.at_mut(index)
    }

    pub fn is_departing(&self, id: &str) -> bool {
        self.slots.get(id).is_some_and(|&i| i >= self.items.len())
    }

    /// Whether `id` was removed and is only kept for its leave animations,
    /// spliced or departing.
    pub fn is_leaving(&self, id: &str) -> bool {
        self.leaving.contains(id)
    }

    pub fn mark_leaving(&mut self, id: &str) {
        self.leaving.insert(id.to_string());
    }

    pub fn push(&mut self, element: E) {
        let id = element.id().to_string();
        self.items.push(Rc::new(element));
        if self.departing.is_empty() {
            self.slots.insert(id, self.items.len() - 1);
        } else {
            self.reindex();
        }
    }

    /// Insert at `index`, clamped to the end.
    pub fn insert(&mut self, index: usize, element: Rc<E>) {
        let index = index.min(self.items.len());
        self.items.insert(index, element);
        self.reindex();
    }

    pub fn remove(&mut self, id: &str) -> Option<Rc<E>> {
        let index = self.position(id)?;
        let element = self.items.remove(index);
        self.reindex();
        Some(element)
    }

    /// Keep members and departing elements matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&E) -> bool) {
        self.items.retain(|e| keep(e.as_ref()));
        self.departing.retain(|e| keep(e.as_ref()));
        self.reindex();
    }

    pub fn chain_link(&self, id: &str) -> Option<&ChainLink> {
        self.chain.get(id)
    }

    pub fn successor(&self, id: &str) -> Option<&str> {
        self.chain.get(id)?.successor.as_deref()
    }

    pub fn predecessor(&self, id: &str) -> Option<&str> {
        self.chain.get(id)?.predecessor.as_deref()
    }

    /// Departing elements chained behind `id`, oldest first.
    pub fn predecessors(&self, id: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.predecessor(id);
        while let Some(p) = cursor {
            if !seen.insert(p) {
                break;
            }
            found.push(p.to_string());
            cursor = self.predecessor(p);
        }
        found.reverse();
        found
    }

    /// Move `element` to the departing table, handing off to `successor`.
    ///
    /// If `successor` already has a predecessor, `element` is inserted
    /// between the two.
    pub fn chain_departing(&mut self, element: Rc<E>, successor: &str) {
        let id = element.id().to_string();
        self.items.retain(|e| e.id() != id);
        self.departing.retain(|e| e.id() != id);
        self.departing.push(element);
        self.leaving.insert(id.clone());
        self.reindex();

        let prior = self
            .chain
            .get(successor)
            .and_then(|link| link.predecessor.clone());
        if let Some(prior) = &prior {
            self.chain.entry(prior.clone()).or_default().successor = Some(id.clone());
        }
        self.chain.insert(
            id.clone(),
            ChainLink {
                predecessor: prior,
                successor: Some(successor.to_string()),
            },
        );
        self.chain.entry(successor.to_string()).or_default().predecessor = Some(id);
    }

    /// Remove `id` from the chain, joining its neighbours.
    pub fn unlink(&mut self, id: &str) {
        let Some(link) = self.chain.remove(id) else {
            return;
        };
        if let Some(p) = &link.predecessor {
            if let Some(entry) = self.chain.get_mut(p) {
                entry.successor = link.successor.clone();
            }
        }
        if let Some(s) = &link.successor {
            if let Some(entry) = self.chain.get_mut(s) {
                entry.predecessor = link.predecessor.clone();
            }
        }
        self.chain.retain(|_, link| !link.is_empty());
    }

    /// Final removal of a leaving element once its leave animations are
    /// done. Elements that are not leaving are never removed here. Returns
    /// whether anything was removed.
    pub fn release(&mut self, id: &str) -> bool {
        if !self.leaving.remove(id) {
            return false;
        }
        if self.is_departing(id) {
            self.departing.retain(|e| e.id() != id);
        } else {
            self.items.retain(|e| e.id() != id);
        }
        self.reindex();
        self.unlink(id);
        true
    }

    /// Carry over departing elements and the chain from `previous`.
    ///
    /// A departing element that is a member again drops its hand-off link;
    /// see [`ElementList::revived`].
    pub fn inherit_departing(&mut self, previous: &ElementList<E>) {
        for element in &previous.departing {
            if !self.slots.contains_key(element.id()) {
                self.departing.push(element.clone());
                self.leaving.insert(element.id().to_string());
            }
        }
        self.reindex();
        for (id, link) in &previous.chain {
            self.chain.entry(id.clone()).or_insert_with(|| link.clone());
        }
        for id in self.revived(previous) {
            self.unlink(&id);
        }
    }

    /// Ids leaving in `previous` that are list members here.
    pub fn revived(&self, previous: &ElementList<E>) -> Vec<String> {
        previous
            .leaving
            .iter()
            .filter(|id| self.contains(id) && !self.leaving.contains(*id))
            .cloned()
            .collect()
    }

    /// Members with their departing predecessors before them. Departing
    /// elements whose successor is gone come last.
    pub fn paint_order(&self) -> Vec<&Rc<E>> {
        let mut order = Vec::with_capacity(self.items.len() + self.departing.len());
        let mut painted: HashSet<&str> = HashSet::new();
        for item in &self.items {
            for p in self.predecessors(item.id()) {
                let departing = self
                    .slots
                    .get(p.as_str())
                    .and_then(|&i| self.departing.get(i.checked_sub(self.items.len())?));
                if let Some(element) = departing {
                    if painted.insert(element.id()) {
                        order.push(element);
                    }
                }
            }
            if painted.insert(item.id()) {
                order.push(item);
            }
        }
        for element in &self.departing {
            if painted.insert(element.id()) {
                order.push(element);
            }
        }
        order
    }

    /// Slot of `id`: member index, or member count plus departing index.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    fn reindex(&mut self) {
        self.slots.clear();
        for (index, element) in self.items.iter().chain(self.departing.iter()).enumerate() {
            self.slots.insert(element.id().to_string(), index);
        }
    }

    fn at(&self, index: usize) -> Option<&Rc<E>> {
        self.items
            .get(index)
            .or_else(|| self.departing.get(index.checked_sub(self.items.len())?))
    }

    fn id_at(&self, index: usize) -> Option<&str> {
        self.at(index).map(|e| e.id())
    }

    fn at_mut(&mut self, index: usize) -> Option<&mut E> {
        let len = self.items.len();
        if index < len {
            self.items.get_mut(index).map(Rc::make_mut)
        } else {
            self.departing.get_mut(index - len).map(Rc::make_mut)
        }
    }

    /// Element at the cached `slot` if it still holds `id`, else looked up
    /// (refreshing the slot).
    pub(crate) fn resolve_mut(&mut self, slot: &mut Option<usize>, id: &str) -> Option<&mut E> {
        let index = match *slot {
            Some(index) if self.id_at(index) == Some(id) => index,
            _ => {
                let index = self.index_of(id)?;
                *slot = Some(index);
                index
            }
        };
        self.at_mut(index)
    }

    fn for_each_changed(&mut self, changed: impl Fn(&E) -> bool, apply: impl Fn(&mut E)) {
        for element in self.items.iter_mut().chain(self.departing.iter_mut()) {
            if changed(element.as_ref()) {
                apply(Rc::make_mut(element));
            }
        }
    }

    pub fn reset(&mut self) {
        self.for_each_changed(|e| e.props() != e.base(), |e| e.reset());
    }

    pub fn settle(&mut self) {
        self.for_each_changed(|e| e.props() != e.base(), |e| e.settle());
    }
}

// ============================================================================
// Render graph
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    pub nodes: ElementList<RenderNode>,
    pub links: ElementList<RenderLink>,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a logical graph. Links are routed between their endpoints.
    pub fn from_graph(graph: &GraphStruct) -> Self {
        let mut root = RenderGraph::new();
        for node in graph.nodes() {
            root.nodes.push(RenderNode::from_graph(node));
        }
        for link in graph.links() {
            root.links.push(RenderLink::from_graph(link));
        }
        root.route_links();
        root.settle();
        root
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.get(id)
    }

    pub fn link(&self, id: &str) -> Option<&RenderLink> {
        self.links.get(id)
    }

    /// Copy whose presented values are reset to the settled ones.
    pub fn snapshot(&self) -> Self {
        let mut copy = self.clone();
        copy.nodes.reset();
        copy.links.reset();
        copy
    }

    /// Copy sharing every element.
    pub fn shallow_clone(&self) -> Self {
        self.clone()
    }

    pub fn settle(&mut self) {
        self.nodes.settle();
        self.links.settle();
    }

    pub fn inherit_departing(&mut self, previous: &RenderGraph) {
        self.nodes.inherit_departing(&previous.nodes);
        self.links.inherit_departing(&previous.links);
    }

    /// Derive routed link geometry from the endpoint midpoints.
    pub fn route_links(&mut self) {
        let mut routes = Vec::new();
        for link in self.links.all() {
            if !link.is_routed() {
                continue;
            }
            let (Some(from), Some(to)) = (self.nodes.get(link.from_id()), self.nodes.get(link.to_id())) else {
                tracing::warn!(link = link.id(), "link endpoint missing, keeping geometry");
                continue;
            };
            let (ax, ay) = midpoint(from.props());
            let (bx, by) = midpoint(to.props());
            routes.push((link.id().to_string(), ax.min(bx), ay.min(by), (ax - bx).abs(), (ay - by).abs()));
        }
        for (id, x, y, width, height) in routes {
            if let Some(link) = self.links.get_mut(&id) {
                let props = link.props_mut();
                props.x = x;
                props.y = y;
                props.width = width;
                props.height = height;
            }
        }
    }

    /// Elements leaving in `previous` that this graph lists again.
    pub fn revived(&self, previous: &RenderGraph) -> Vec<TweenTarget> {
        let nodes = self.nodes.revived(&previous.nodes).into_iter().map(TweenTarget::node);
        let links = self.links.revived(&previous.links).into_iter().map(TweenTarget::link);
        nodes.chain(links).collect()
    }

    pub fn locate(&self, target: &TweenTarget) -> Option<usize> {
        match target.kind {
            ElementKind::Node => self.nodes.index_of(&target.id),
            ElementKind::Link => self.links.index_of(&target.id),
        }
    }

    /// A leave tween of `target` started.
    pub fn begin_leave(&mut self, target: &TweenTarget) {
        match target.kind {
            ElementKind::Node => begin_leave(&mut self.nodes, &target.id),
            ElementKind::Link => begin_leave(&mut self.links, &target.id),
        }
    }

    /// A started leave tween of `target` ended. Returns whether none remain.
    pub fn end_leave(&mut self, target: &TweenTarget) -> bool {
        match target.kind {
            ElementKind::Node => end_leave(&mut self.nodes, &target.id),
            ElementKind::Link => end_leave(&mut self.links, &target.id),
        }
    }

    /// Drop a leaving element once no leave tween is active on it.
    /// Returns whether it was released.
    pub fn release(&mut self, target: &TweenTarget) -> bool {
        match target.kind {
            ElementKind::Node => release(&mut self.nodes, &target.id),
            ElementKind::Link => release(&mut self.links, &target.id),
        }
    }

    pub fn nodes_in_paint_order(&self) -> Vec<Rc<RenderNode>> {
        self.nodes.paint_order().into_iter().cloned().collect()
    }

    pub fn links_in_paint_order(&self) -> Vec<Rc<RenderLink>> {
        self.links.paint_order().into_iter().cloned().collect()
    }
}

fn midpoint(props: &Props) -> (f64, f64) {
    (props.x + props.width / 2.0, props.y + props.height / 2.0)
}

fn begin_leave<E: RenderElement>(list: &mut ElementList<E>, id: &str) {
    if let Some(element) = list.get_mut(id) {
        let count = element.active_animations();
        element.set_active_animations(count + 1);
    }
}

fn end_leave<E: RenderElement>(list: &mut ElementList<E>, id: &str) -> bool {
    let Some(element) = list.get_mut(id) else {
        return false;
    };
    let count = element.active_animations().saturating_sub(1);
    element.set_active_animations(count);
    count == 0
}

fn release<E: RenderElement>(list: &mut ElementList<E>, id: &str) -> bool {
    if list.get(id).is_none_or(|e| e.active_animations() > 0) {
        return false;
    }
    tracing::debug!(id, "release departed element");
    list.release(id)
}

impl Mutator for RenderGraph {
    fn mutate(
        &mut self,
        target: &TweenTarget,
        slot: &mut Option<usize>,
        property: Property,
        value: &Value,
    ) -> Result<(), AnimError> {
        let props = match target.kind {
            ElementKind::Node => self.nodes.resolve_mut(slot, &target.id).map(|e| e.props_mut()),
            ElementKind::Link => self.links.resolve_mut(slot, &target.id).map(|e| e.props_mut()),
        };
        match props {
            Some(props) => props.set(property, value),
            None => {
                *slot = None;
                tracing::warn!(target = %target.id, %property, "mutation of vanished element ignored");
                Ok(())
            }
        }
    }
}
