//! Animated list: rows slide in from the right, slide out to the left, and
//! glide to their new slot when the order changes.

use anyhow::Result;
use weft_anim::{Easing, Property, TransitionConfig, Trigger};
use weft_config::DemoConfig;
use weft_graph::{GraphError, GraphNode, GraphStruct};

use super::Scenario;

const ROW_WIDTH: f64 = 240.0;
const ROW_HEIGHT: f64 = 60.0;
const SLIDE: f64 = 300.0;
const DURATION: f64 = 300.0;
/// Frames between two edits.
const EDIT_EVERY: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Add,
    Remove,
    Replace,
    Shuffle,
}

const EDITS: [Edit; 4] = [Edit::Add, Edit::Remove, Edit::Replace, Edit::Shuffle];

#[derive(Debug, Default)]
pub struct ListScene {
    next_id: usize,
    edits: usize,
}

impl ListScene {
    fn row(&mut self) -> GraphNode {
        let id = format!("item-{}", self.next_id);
        self.next_id += 1;
        let transition = || TransitionConfig::new(DURATION).easing(Easing::EaseIn);
        GraphNode::with_id(id)
            .with_size(ROW_WIDTH, ROW_HEIGHT)
            .with_transition(Trigger::Enter, [transition().from(Property::OffsetX, SLIDE)])
            .with_transition(Trigger::Update, [transition().properties([Property::Y])])
            .with_transition(Trigger::Leave, [transition().to(Property::OffsetX, -SLIDE)])
    }

    fn apply(&mut self, edit: Edit, graph: &mut GraphStruct) -> Result<()> {
        let len = graph.nodes().len();
        match edit {
            Edit::Add => {
                let row = self.row();
                graph.insert_node(len.min(1), row)?;
            }
            Edit::Remove if len > 0 => {
                let id = graph.nodes()[len / 2].id.clone();
                graph.remove_node(&id)?;
            }
            Edit::Replace if len > 0 => {
                let row = self.row();
                let id = graph.nodes()[0].id.clone();
                graph.transaction(|g| {
                    g.remove_node(&id)?;
                    g.insert_node(0, row)
                })?;
            }
            Edit::Shuffle => {
                graph.transaction(|g| {
                    for index in 0..len {
                        g.move_node(len - 1, index)?;
                    }
                    Ok::<(), GraphError>(())
                })?;
            }
            Edit::Remove | Edit::Replace => {}
        }
        tracing::info!(?edit, rows = graph.nodes().len(), "list edited");
        Ok(())
    }
}

impl Scenario for ListScene {
    fn name(&self) -> &'static str {
        "list"
    }

    fn init_graph(&mut self, config: &DemoConfig) -> Result<GraphStruct> {
        let mut graph = GraphStruct::new();
        for _ in 0..config.items {
            let row = self.row();
            graph.add_node(row)?;
        }
        Ok(graph)
    }

    fn on_frame(&mut self, frame: u32, graph: &mut GraphStruct) -> Result<bool> {
        if frame == 0 || frame % EDIT_EVERY != 0 {
            return Ok(false);
        }
        let edit = EDITS[self.edits % EDITS.len()];
        self.edits += 1;
        self.apply(edit, graph)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(graph: &GraphStruct) -> Vec<&str> {
        graph.nodes().iter().map(|n| n.id.as_str()).collect()
    }

    fn scene(items: usize) -> (ListScene, GraphStruct) {
        let mut scene = ListScene::default();
        let config = DemoConfig {
            items,
            ..DemoConfig::default()
        };
        let graph = scene.init_graph(&config).unwrap();
        (scene, graph)
    }

    #[test]
    fn test_edits_cycle_on_schedule() {
        let (mut scene, mut graph) = scene(3);
        assert_eq!(ids(&graph), vec!["item-0", "item-1", "item-2"]);

        assert!(!scene.on_frame(0, &mut graph).unwrap());
        assert!(!scene.on_frame(3, &mut graph).unwrap());

        assert!(scene.on_frame(8, &mut graph).unwrap());
        assert_eq!(ids(&graph), vec!["item-0", "item-3", "item-1", "item-2"]);

        assert!(scene.on_frame(16, &mut graph).unwrap());
        assert_eq!(ids(&graph), vec!["item-0", "item-3", "item-2"]);

        assert!(scene.on_frame(24, &mut graph).unwrap());
        assert_eq!(ids(&graph), vec!["item-4", "item-3", "item-2"]);

        assert!(scene.on_frame(32, &mut graph).unwrap());
        assert_eq!(ids(&graph), vec!["item-2", "item-3", "item-4"]);
    }

    #[test]
    fn test_edits_on_empty_list() {
        let (mut scene, mut graph) = scene(0);
        scene.apply(Edit::Remove, &mut graph).unwrap();
        scene.apply(Edit::Replace, &mut graph).unwrap();
        scene.apply(Edit::Shuffle, &mut graph).unwrap();
        assert!(graph.nodes().is_empty());
        scene.apply(Edit::Add, &mut graph).unwrap();
        assert_eq!(ids(&graph), vec!["item-0"]);
    }
}
