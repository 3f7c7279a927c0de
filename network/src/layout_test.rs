use super::*;
use crate::element::GraphElement;

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> ElementSet {
    let mut elements: Vec<GraphElement> = nodes.iter().map(|id| GraphElement::node(*id)).collect();
    elements.extend(edges.iter().map(|(s, t)| GraphElement::edge(s, t)));
    ElementSet::from_elements(elements).expect("unique ids")
}

fn layer_of(layout: &GraphLayout, id: &str) -> usize {
    layout.node(id).expect("node placed").layer
}

#[test]
fn empty_set_has_empty_layout() {
    let layout = layered(&ElementSet::new());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
}

#[test]
fn chain_is_layered_by_longest_path() {
    let layout = layered(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]));
    assert_eq!(layer_of(&layout, "a"), 0);
    assert_eq!(layer_of(&layout, "b"), 1);
    assert_eq!(layer_of(&layout, "c"), 2);
}

#[test]
fn every_dag_edge_points_downward() {
    let layout = layered(&graph(
        &["asia", "tub", "smoke", "lung", "either", "xray"],
        &[("asia", "tub"), ("smoke", "lung"), ("tub", "either"), ("lung", "either"), ("either", "xray")],
    ));
    for edge in &layout.edges {
        assert!(edge.y2 > edge.y1, "{} should point down", edge.id);
    }
    assert_eq!(layout.edges.len(), 5);
}

#[test]
fn cycles_still_place_every_node() {
    let layout = layered(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "b")]));
    assert_eq!(layout.nodes.len(), 3);
    assert_eq!(layer_of(&layout, "a"), 0);
    assert!(layer_of(&layout, "b") >= 1);
}

#[test]
fn pure_cycle_starts_at_first_node() {
    let layout = layered(&graph(&["x", "y"], &[("x", "y"), ("y", "x")]));
    assert_eq!(layer_of(&layout, "x"), 0);
    assert_eq!(layer_of(&layout, "y"), 1);
}

#[test]
fn nodes_in_a_layer_do_not_overlap() {
    let layout = layered(&graph(&["a", "b", "c", "d"], &[]));
    let mut xs: Vec<f64> = layout.nodes.iter().map(|node| node.x).collect();
    xs.sort_by(f64::total_cmp);
    for pair in xs.windows(2) {
        assert!(pair[1] - pair[0] >= NODE_SPACING - f64::EPSILON);
    }
    assert!(layout.width >= PADDING * 2.0 + 3.0 * NODE_SPACING - f64::EPSILON);
}

#[test]
fn children_follow_parent_order() {
    let layout = layered(&graph(&["p", "q", "qc", "pc"], &[("p", "pc"), ("q", "qc")]));
    let pc = layout.node("pc").expect("placed").x;
    let qc = layout.node("qc").expect("placed").x;
    assert!(pc < qc);
}

#[test]
fn self_loops_and_dangling_edges_are_skipped() {
    let mut set = graph(&["a"], &[("a", "a")]);
    set.insert(GraphElement::edge("a", "ghost"));
    let layout = layered(&set);
    assert_eq!(layout.nodes.len(), 1);
    assert!(layout.edges.is_empty());
}

#[test]
fn segments_are_trimmed_to_node_radius() {
    let layout = layered(&graph(&["a", "b"], &[("a", "b")]));
    let a = layout.node("a").expect("placed");
    let segment = &layout.edges[0];
    let gap = (segment.x1 - a.x).hypot(segment.y1 - a.y);
    assert!((gap - NODE_RADIUS).abs() < 1e-9);
}

#[test]
fn cycle_inside_a_dag_sits_above_its_children() {
    let layout = layered(&graph(
        &["root", "b", "c", "leaf"],
        &[("root", "b"), ("b", "c"), ("c", "b"), ("c", "leaf")],
    ));
    assert_eq!(layer_of(&layout, "root"), 0);
    assert_eq!(layer_of(&layout, "b"), 1);
    assert_eq!(layer_of(&layout, "c"), 2);
    assert_eq!(layer_of(&layout, "leaf"), 3);
}

#[test]
fn child_of_a_cycle_member_lands_below_the_whole_component() {
    let layout = layered(&graph(
        &["x", "y", "z", "out"],
        &[("x", "y"), ("y", "z"), ("z", "x"), ("x", "out")],
    ));
    let deepest = ["x", "y", "z"].iter().map(|id| layer_of(&layout, id)).max().expect("members");
    assert!(layer_of(&layout, "out") > deepest);
}

#[test]
fn cycle_members_are_stacked_in_input_order() {
    let layout = layered(&graph(&["c", "a", "b"], &[("a", "b"), ("b", "c"), ("c", "a")]));
    assert_eq!(layer_of(&layout, "c"), 0);
    assert_eq!(layer_of(&layout, "a"), 1);
    assert_eq!(layer_of(&layout, "b"), 2);
}
