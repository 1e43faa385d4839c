use anyhow::Result;
use weft_graph::{GraphError, GraphLink, GraphNode, GraphStruct, Op};

fn sample() -> Result<GraphStruct> {
    let mut graph = GraphStruct::new();
    for id in ["a", "b", "c"] {
        graph.add_node(GraphNode::with_id(id).with_height(20.0))?;
    }
    graph.push_link(GraphLink::with_id("ab", "a", "b"))?;
    Ok(graph)
}

#[test]
fn failed_transaction_restores_graph() -> Result<()> {
    let mut graph = sample()?;
    let before = graph.clone();

    let result = graph.transaction(|g| -> Result<(), GraphError> {
        g.remove_node("b")?;
        g.move_node(0, 1)?;
        g.update_node("a", |n| n.opacity = 0.2)?;
        g.add_link("c", "a")?;
        g.insert_node(1, GraphNode::with_id("d"))?;
        g.remove_node("missing")?;
        Ok(())
    });

    assert_eq!(result.unwrap_err(), GraphError::MissingNode("missing".into()));
    assert_eq!(graph, before);
    assert!(!graph.is_recording());
    Ok(())
}

#[test]
fn successful_transaction_can_be_undone_and_redone() -> Result<()> {
    let mut graph = sample()?;
    let before = graph.clone();

    let record = graph.transaction(|g| -> Result<(), GraphError> {
        g.insert_node(0, GraphNode::with_id("z"))?;
        g.swap_nodes(1, 3)?;
        g.remove_link("ab")?;
        Ok(())
    })?;
    let after = graph.clone();

    assert_eq!(record.len(), 3);
    assert!(matches!(record.exec_ops().next(), Some(Op::InsertNode { index: 0, .. })));

    record.undo(&mut graph)?;
    assert_eq!(graph, before);

    record.redo(&mut graph)?;
    assert_eq!(graph, after);
    Ok(())
}

#[test]
fn nested_failure_only_reverts_inner_ops() -> Result<()> {
    let mut graph = sample()?;

    let record = graph.transaction(|g| -> Result<(), GraphError> {
        g.update_node("a", |n| n.y = 10.0)?;
        let inner = g.transaction(|g| -> Result<(), GraphError> {
            g.remove_node("c")?;
            g.remove_node("c")?;
            Ok(())
        });
        assert!(inner.is_err());
        assert!(g.node("c").is_some());
        Ok(())
    })?;

    assert_eq!(record.len(), 1);
    assert_eq!(graph.node("a").map(|n| n.y), Some(10.0));
    assert_eq!(graph.nodes().len(), 3);
    Ok(())
}

#[test]
fn removing_a_node_keeps_its_links() -> Result<()> {
    let mut graph = sample()?;
    graph.remove_node("b")?;
    assert_eq!(graph.links().len(), 1);
    assert!(graph.children("a").is_empty());
    Ok(())
}

#[test]
fn apply_returns_inverse() -> Result<()> {
    let mut graph = sample()?;
    let inverse = graph.apply(Op::MoveNode { from: 2, to: 0 })?;
    assert_eq!(inverse, Op::MoveNode { from: 0, to: 2 });
    assert_eq!(graph.nodes()[0].id, "c");
    graph.apply(inverse)?;
    assert_eq!(graph, sample()?);
    Ok(())
}
