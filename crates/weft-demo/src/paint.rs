//! Text painter: one line per element, in paint order.

use std::rc::Rc;

use weft_render::{
    FrameInfo, HookHandle, Hooks, Next, PaintContext, RenderElement, RenderGraph, RenderLink, RenderNode,
    RendererPlugin,
};

pub type Frame = Vec<String>;

pub struct TextPainter;

impl RendererPlugin<Frame> for TextPainter {
    fn name(&self) -> &'static str {
        "text-painter"
    }

    fn install(&self, hooks: &mut Hooks<Frame>) -> Vec<HookHandle> {
        let paint = hooks.on_paint(
            |graph: RenderGraph, ctx: &PaintContext<Frame>, _: Next<'_, RenderGraph, Frame, PaintContext<Frame>>| {
                let mut lines = Vec::new();
                for node in graph.nodes_in_paint_order() {
                    let mut line = ctx.render_node(&node)?;
                    if graph.nodes.is_leaving(node.id()) {
                        for l in &mut line {
                            l.push_str("  (leaving)");
                        }
                    }
                    lines.extend(line);
                }
                for link in graph.links_in_paint_order() {
                    lines.extend(ctx.render_link(&link)?);
                }
                Ok(lines)
            },
        );
        let node = hooks.on_node(|node: Rc<RenderNode>, _: &FrameInfo, _: Next<'_, Rc<RenderNode>, Frame, FrameInfo>| {
            let props = node.props();
            Ok(vec![format!(
                "{:<8} y={:>7.1} dx={:>7.1} opacity={:.2}",
                node.id(),
                props.y,
                props.offset_x,
                props.opacity
            )])
        });
        let link = hooks.on_link(|link: Rc<RenderLink>, _: &FrameInfo, _: Next<'_, Rc<RenderLink>, Frame, FrameInfo>| {
            Ok(vec![format!("{} -> {}", link.from_id(), link.to_id())])
        });
        vec![paint, node, link]
    }
}
