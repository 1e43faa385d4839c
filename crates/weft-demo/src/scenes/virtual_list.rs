//! Long list behind a small scrolling viewport. Only rows near the
//! viewport are painted; rows fade in and out.

use anyhow::Result;
use weft_anim::{Property, TransitionConfig, Trigger};
use weft_config::DemoConfig;
use weft_graph::{GraphNode, GraphStruct};
use weft_render::Rect;

use super::Scenario;

const ROWS: usize = 100;
const ROW_WIDTH: f64 = 320.0;
const ROW_HEIGHT: f64 = 40.0;
const VIEWPORT_HEIGHT: f64 = 240.0;
const SCROLL_STEP: f64 = 45.0;
const FADE: f64 = 200.0;
/// Frame at which the first visible row is deleted.
const DELETE_AT: u32 = 6;

#[derive(Debug, Default)]
pub struct VirtualListScene {
    scroll: f64,
}

impl VirtualListScene {
    fn row(index: usize) -> GraphNode {
        let fade = || TransitionConfig::new(FADE);
        GraphNode::with_id(format!("row-{index:03}"))
            .with_size(ROW_WIDTH, ROW_HEIGHT)
            .with_transition(Trigger::Enter, [fade().from(Property::Opacity, 0.0)])
            .with_transition(Trigger::Update, [fade().properties([Property::Y])])
            .with_transition(Trigger::Leave, [fade().to(Property::Opacity, 0.0)])
    }

    fn window(&self) -> Rect {
        Rect::from_xywh(0.0, self.scroll, ROW_WIDTH, VIEWPORT_HEIGHT)
    }

    /// Index of the first row intersecting the viewport.
    fn first_visible(&self) -> usize {
        (self.scroll / ROW_HEIGHT).floor() as usize
    }
}

impl Scenario for VirtualListScene {
    fn name(&self) -> &'static str {
        "virtual"
    }

    fn init_graph(&mut self, _config: &DemoConfig) -> Result<GraphStruct> {
        let mut graph = GraphStruct::new();
        for index in 0..ROWS {
            graph.add_node(Self::row(index))?;
        }
        Ok(graph)
    }

    fn viewport(&self) -> Option<Rect> {
        Some(self.window())
    }

    fn on_frame(&mut self, frame: u32, graph: &mut GraphStruct) -> Result<bool> {
        if frame != DELETE_AT {
            return Ok(false);
        }
        let Some(id) = graph.nodes().get(self.first_visible()).map(|n| n.id.clone()) else {
            return Ok(false);
        };
        graph.remove_node(&id)?;
        tracing::info!(%id, "deleted visible row");
        Ok(true)
    }

    fn on_scroll(&mut self, _frame: u32) -> Option<Rect> {
        let max = ROWS as f64 * ROW_HEIGHT - VIEWPORT_HEIGHT;
        self.scroll = (self.scroll + SCROLL_STEP).min(max);
        Some(self.window())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_stops_at_the_end() {
        let mut scene = VirtualListScene::default();
        let mut last = Rect::UNBOUNDED;
        for frame in 0..200 {
            if let Some(viewport) = scene.on_scroll(frame) {
                last = viewport;
            }
        }
        assert_eq!(last.bottom, ROWS as f64 * ROW_HEIGHT);
        assert_eq!(last.height(), VIEWPORT_HEIGHT);
    }

    #[test]
    fn test_deletes_first_visible_row() {
        let mut scene = VirtualListScene::default();
        let mut graph = scene.init_graph(&DemoConfig::default()).unwrap();
        scene.on_scroll(0);
        scene.on_scroll(1);
        assert!(!scene.on_frame(0, &mut graph).unwrap());
        assert!(scene.on_frame(DELETE_AT, &mut graph).unwrap());
        // 90px scrolled: row 2 is the first one in view
        assert!(graph.node("row-002").is_none());
        assert_eq!(graph.nodes().len(), ROWS - 1);
    }
}
