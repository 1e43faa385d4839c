//! Logical nodes and links.
//!
//! These carry the authoritative values the renderer projects into its
//! render graph, plus the declarative transition/animation configs.

use serde::{Deserialize, Serialize};
use weft_anim::{Matrix, NodeAnimation, NodeTransition, Rgba, Trigger, TransitionConfig};

fn default_opacity() -> f64 {
    1.0
}

fn default_color() -> Rgba {
    Rgba::BLACK
}

fn default_background() -> Rgba {
    Rgba::WHITE
}

pub(crate) fn new_id() -> String {
    nanoid::nanoid!()
}

/// A node of the logical graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    /// Unset sizes project to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_color")]
    pub color: Rgba,
    #[serde(default = "default_background")]
    pub background_color: Rgba,
    #[serde(default)]
    pub matrix: Matrix,
    #[serde(default)]
    pub transitions: Vec<NodeTransition>,
    #[serde(default)]
    pub animations: Vec<NodeAnimation>,
}

impl Default for GraphNode {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode {
    /// A node with a fresh random id.
    pub fn new() -> Self {
        Self::with_id(new_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: 0.0,
            y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width: None,
            height: None,
            opacity: default_opacity(),
            color: default_color(),
            background_color: default_background(),
            matrix: Matrix::identity(),
            transitions: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background_color = color;
        self
    }

    /// Append configs to the transition for `trigger`, creating it if needed.
    pub fn with_transition(
        mut self,
        trigger: Trigger,
        configs: impl IntoIterator<Item = TransitionConfig>,
    ) -> Self {
        match self.transitions.iter_mut().find(|t| t.trigger == trigger) {
            Some(existing) => existing.configs.extend(configs),
            None => self.transitions.push(NodeTransition::new(trigger, configs)),
        }
        self
    }

    pub fn with_animation(mut self, animation: NodeAnimation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Rotate by `angle` radians around `(cx, cy)`, after the current matrix.
    pub fn rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.matrix = self.matrix.then(&Matrix::rotate_around(angle, cx, cy));
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.matrix = self.matrix.then(&Matrix::translate(x, y));
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.matrix = self.matrix.then(&Matrix::scale(x, y));
    }
}

/// Explicit link geometry, overriding the endpoint-derived one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A directed link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub id: String,
    /// `[from, to]` node ids.
    pub ends: [String; 2],
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_color")]
    pub color: Rgba,
    #[serde(default = "default_background")]
    pub background_color: Rgba,
    #[serde(default)]
    pub matrix: Matrix,
    #[serde(default)]
    pub transitions: Vec<NodeTransition>,
    #[serde(default)]
    pub animations: Vec<NodeAnimation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

impl GraphLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::with_id(new_id(), from, to)
    }

    pub fn with_id(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ends: [from.into(), to.into()],
            opacity: default_opacity(),
            color: default_color(),
            background_color: default_background(),
            matrix: Matrix::identity(),
            transitions: Vec::new(),
            animations: Vec::new(),
            geometry: None,
        }
    }

    pub fn from_id(&self) -> &str {
        &self.ends[0]
    }

    pub fn to_id(&self) -> &str {
        &self.ends[1]
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.ends.iter().any(|end| end == node_id)
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_transition(
        mut self,
        trigger: Trigger,
        configs: impl IntoIterator<Item = TransitionConfig>,
    ) -> Self {
        match self.transitions.iter_mut().find(|t| t.trigger == trigger) {
            Some(existing) => existing.configs.extend(configs),
            None => self.transitions.push(NodeTransition::new(trigger, configs)),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_anim::Property;

    #[test]
    fn test_node_defaults() {
        let node = GraphNode::new();
        assert_eq!(node.id.len(), 21);
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.color, Rgba::BLACK);
        assert_eq!(node.background_color, Rgba::WHITE);
        assert!(node.width.is_none());
        assert_ne!(GraphNode::new().id, node.id);
    }

    #[test]
    fn test_with_transition_merges_triggers() {
        let node = GraphNode::with_id("a")
            .with_transition(Trigger::Enter, [TransitionConfig::new(100.0).from(Property::Opacity, 0.0)])
            .with_transition(Trigger::Enter, [TransitionConfig::new(100.0).from(Property::X, -20.0)]);
        assert_eq!(node.transitions.len(), 1);
        assert_eq!(node.transitions[0].configs.len(), 2);
    }

    #[test]
    fn test_node_wire_format() {
        let json = r##"{
            "id": "n1",
            "height": 60,
            "backgroundColor": "#ff0000",
            "transitions": [{ "trigger": "leave", "configs": [{ "to": { "opacity": 0 } }] }]
        }"##;
        let node: GraphNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.height, Some(60.0));
        assert_eq!(node.background_color, Rgba::new(255.0, 0.0, 0.0, 1.0));
        assert_eq!(node.opacity, 1.0);
        assert_eq!(node.transitions[0].trigger, Trigger::Leave);
    }

    #[test]
    fn test_translate_composes() {
        let mut node = GraphNode::with_id("a");
        node.translate(5.0, 0.0);
        node.translate(0.0, 3.0);
        assert_eq!(node.matrix.apply_point(0.0, 0.0), (5.0, 3.0));
    }

    #[test]
    fn test_link_ends() {
        let link = GraphLink::with_id("l", "a", "b");
        assert_eq!(link.from_id(), "a");
        assert_eq!(link.to_id(), "b");
        assert!(link.touches("b"));
        assert!(!link.touches("c"));
    }
}
