use anyhow::Result;
use weft_config::{DemoConfig, WeftConfig};
use weft_graph::GraphStruct;
use weft_render::{FrameLoop, ManualTicker, Rect, Renderer};

use crate::paint::{Frame, TextPainter};

pub mod list;
pub mod virtual_list;

/// A scripted sequence of graph edits replayed against a renderer.
pub trait Scenario {
    fn name(&self) -> &'static str;
    fn init_graph(&mut self, config: &DemoConfig) -> Result<GraphStruct>;
    /// Starting viewport. Unbounded unless overridden.
    fn viewport(&self) -> Option<Rect> {
        None
    }
    /// Edit the graph before `frame`; return true to commit the edits.
    fn on_frame(&mut self, _frame: u32, _graph: &mut GraphStruct) -> Result<bool> {
        Ok(false)
    }
    /// Viewport for `frame`, when it moves.
    fn on_scroll(&mut self, _frame: u32) -> Option<Rect> {
        None
    }
}

/// Drive `scenario` for the configured number of frames, logging every
/// painted frame. Returns how many frames rendered.
pub fn run(scenario: &mut dyn Scenario, config: &WeftConfig) -> Result<u32> {
    let mut renderer: Renderer<Frame> = Renderer::with_config(config);
    renderer.install(&TextPainter);

    let mut graph = scenario.init_graph(&config.demo)?;
    if let Some(viewport) = scenario.viewport() {
        renderer.update_viewport(viewport);
    }
    renderer.commit(graph.clone());

    let mut frames = FrameLoop::new(ManualTicker::new(config.demo.frame_interval_ms));
    let mut rendered = 0;
    for frame in 0..config.demo.frames {
        if scenario.on_frame(frame, &mut graph)? {
            renderer.commit(graph.clone());
        }
        if let Some(viewport) = scenario.on_scroll(frame) {
            renderer.update_viewport(viewport);
        }

        frames.ticker_mut().advance();
        for output in frames.step(&mut renderer)? {
            rendered += 1;
            tracing::info!(
                scenario = scenario.name(),
                frame,
                tweens = renderer.tweens().len(),
                lines = output.len(),
                "painted"
            );
            for line in output {
                tracing::debug!("  {line}");
            }
        }
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frames: u32) -> WeftConfig {
        let mut config = WeftConfig::default();
        config.demo.frames = frames;
        config
    }

    #[test]
    fn test_list_scene_renders_every_busy_frame() {
        let mut scene = list::ListScene::default();
        let rendered = run(&mut scene, &config(40)).unwrap();
        assert!(rendered > 0);
        assert!(rendered <= 40);
    }

    #[test]
    fn test_virtual_list_scrolls() {
        let mut scene = virtual_list::VirtualListScene::default();
        let rendered = run(&mut scene, &config(12)).unwrap();
        // Scrolling schedules a frame on every tick
        assert_eq!(rendered, 12);
    }

    #[test]
    fn test_idle_scene_renders_once() {
        struct Idle;
        impl Scenario for Idle {
            fn name(&self) -> &'static str {
                "idle"
            }
            fn init_graph(&mut self, _config: &DemoConfig) -> Result<GraphStruct> {
                Ok(GraphStruct::new())
            }
        }
        assert_eq!(run(&mut Idle, &config(10)).unwrap(), 1);
    }
}
