//! Renderer plugins: bundles of hooks installed together.

use weft_config::{ClipConfig, LayoutConfig, LayoutDirection};

use crate::hooks::{FrameInfo, HookHandle, Hooks, Next};
use crate::render_graph::{ElementList, RenderElement, RenderGraph, RenderNode};

pub trait RendererPlugin<T> {
    fn name(&self) -> &'static str;

    /// Register hooks; the handles let the caller uninstall them.
    fn install(&self, hooks: &mut Hooks<T>) -> Vec<HookHandle>;
}

/// Culls elements outside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipPlugin {
    pub margin: f64,
}

impl From<&ClipConfig> for ClipPlugin {
    fn from(config: &ClipConfig) -> Self {
        Self {
            margin: config.margin,
        }
    }
}

impl<T> RendererPlugin<T> for ClipPlugin {
    fn name(&self) -> &'static str {
        "clip"
    }

    fn install(&self, hooks: &mut Hooks<T>) -> Vec<HookHandle> {
        let margin = self.margin;
        let handle = hooks.on_clip(
            move |mut graph: RenderGraph, info: &FrameInfo, next: Next<'_, RenderGraph, RenderGraph, FrameInfo>| {
                let bounds = info.viewport.grow(margin);
                graph.nodes.retain(|n| n.rect().intersects(&bounds));
                graph.links.retain(|l| l.rect().intersects(&bounds));
                next.run(graph)
            },
        );
        vec![handle]
    }
}

/// Stacks nodes one after another along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearLayoutPlugin {
    pub direction: LayoutDirection,
    pub gap: f64,
}

impl From<&LayoutConfig> for LinearLayoutPlugin {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            direction: config.direction,
            gap: config.gap,
        }
    }
}

impl LinearLayoutPlugin {
    /// Position every node. Departing nodes take the position of the node
    /// they hand off to. Links are re-routed afterwards.
    pub fn layout(&self, graph: &mut RenderGraph) {
        let members: Vec<String> = graph.nodes.items().iter().map(|n| n.id().to_string()).collect();
        let mut cursor = 0.0;
        for id in members {
            let Some(extent) = graph.nodes.get(&id).map(|n| self.extent(n)) else {
                continue;
            };
            for departing in graph.nodes.predecessors(&id) {
                self.place(&mut graph.nodes, &departing, cursor);
            }
            self.place(&mut graph.nodes, &id, cursor);
            cursor += extent + self.gap;
        }
        graph.route_links();
    }

    fn extent(&self, node: &RenderNode) -> f64 {
        match self.direction {
            LayoutDirection::Vertical => node.props().height,
            LayoutDirection::Horizontal => node.props().width,
        }
    }

    fn place(&self, nodes: &mut ElementList<RenderNode>, id: &str, position: f64) {
        let current = nodes.get(id).map(|n| match self.direction {
            LayoutDirection::Vertical => n.props().y,
            LayoutDirection::Horizontal => n.props().x,
        });
        if current.is_none_or(|p| p == position) {
            return;
        }
        if let Some(node) = nodes.get_mut(id) {
            let props = node.props_mut();
            match self.direction {
                LayoutDirection::Vertical => props.y = position,
                LayoutDirection::Horizontal => props.x = position,
            }
        }
    }
}

impl<T> RendererPlugin<T> for LinearLayoutPlugin {
    fn name(&self) -> &'static str {
        "linear-layout"
    }

    fn install(&self, hooks: &mut Hooks<T>) -> Vec<HookHandle> {
        let plugin = *self;
        let handle = hooks.on_layout(
            move |mut graph: RenderGraph, _: &FrameInfo, next: Next<'_, RenderGraph, RenderGraph, FrameInfo>| {
                plugin.layout(&mut graph);
                next.run(graph)
            },
        );
        vec![handle]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use weft_graph::{GraphNode, GraphStruct};

    fn root(heights: &[(&str, f64)]) -> RenderGraph {
        let mut graph = GraphStruct::new();
        for (id, height) in heights {
            graph
                .add_node(GraphNode::with_id(*id).with_size(10.0, *height))
                .unwrap();
        }
        RenderGraph::from_graph(&graph)
    }

    fn ys(graph: &RenderGraph) -> Vec<f64> {
        graph.nodes.iter().map(|n| n.props().y).collect()
    }

    #[test]
    fn test_vertical_stack_with_gap() {
        let mut graph = root(&[("a", 20.0), ("b", 30.0), ("c", 10.0)]);
        LinearLayoutPlugin {
            direction: LayoutDirection::Vertical,
            gap: 5.0,
        }
        .layout(&mut graph);
        assert_eq!(ys(&graph), vec![0.0, 25.0, 60.0]);
    }

    #[test]
    fn test_horizontal_stack() {
        let mut graph = root(&[("a", 20.0), ("b", 30.0)]);
        LinearLayoutPlugin {
            direction: LayoutDirection::Horizontal,
            gap: 0.0,
        }
        .layout(&mut graph);
        let xs: Vec<f64> = graph.nodes.iter().map(|n| n.props().x).collect();
        assert_eq!(xs, vec![0.0, 10.0]);
    }

    #[test]
    fn test_departing_shares_successor_slot() {
        let mut graph = root(&[("a", 20.0), ("c", 20.0)]);
        let mut leaving = RenderNode::from_graph(&GraphNode::with_id("b").with_size(10.0, 20.0));
        leaving.props_mut().y = 500.0;
        graph.nodes.chain_departing(Rc::new(leaving), "c");

        LinearLayoutPlugin::default().layout(&mut graph);
        assert_eq!(graph.node("b").unwrap().props().y, 20.0);
        assert_eq!(graph.node("c").unwrap().props().y, 20.0);
    }

    #[test]
    fn test_clip_hook_culls_outside_viewport() {
        let mut graph = root(&[("a", 20.0), ("b", 20.0), ("c", 20.0)]);
        LinearLayoutPlugin::default().layout(&mut graph);

        let mut hooks: Hooks<()> = Hooks::new();
        let handles = ClipPlugin { margin: 0.0 }.install(&mut hooks);
        assert_eq!(handles.len(), 1);

        let info = FrameInfo {
            timestamp: 0.0,
            frame: 0,
            action: Default::default(),
            viewport: crate::rect::Rect::from_xywh(0.0, 0.0, 100.0, 30.0),
        };
        let clipped = hooks
            .clip
            .run(graph, &info, &mut |g: RenderGraph, _: &FrameInfo| Ok(g))
            .unwrap();
        let ids: Vec<_> = clipped.nodes.iter().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
