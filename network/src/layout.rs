//! Layered layout for the causal graph.
//!
//! Nodes are placed top-to-bottom by longest path from a root, so every edge
//! of a DAG points downward. Cycles are tolerated: each strongly connected
//! component is placed below every component that feeds it, and its members
//! are stacked in input order, ignoring edges that point back to an earlier
//! member. Within a layer nodes are ordered by the mean position of their
//! parents (barycenter), ties broken by input order.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::element::ElementSet;

pub const NODE_RADIUS: f64 = 25.0;
pub const LAYER_SPACING: f64 = 110.0;
pub const NODE_SPACING: f64 = 120.0;
pub const PADDING: f64 = 40.0;

#[derive(Clone, Debug, PartialEq)]
pub struct NodePosition {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub layer: usize,
}

/// A drawable edge, trimmed so it starts and ends on the node circles.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSegment {
    pub id: String,
    pub source: String,
    pub target: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLayout {
    pub nodes: Vec<NodePosition>,
    pub edges: Vec<EdgeSegment>,
    pub width: f64,
    pub height: f64,
}

impl GraphLayout {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Node weights are input positions, so `NodeIndex::index()` is the
/// position of the node in `ElementSet::nodes()`.
type LayoutGraph = DiGraph<usize, ()>;

/// Compute positions for every node and segments for every drawable edge.
///
/// Self-loops and edges whose endpoints are not nodes of the set are skipped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layered(elements: &ElementSet) -> GraphLayout {
    let nodes: Vec<(&str, &str)> = elements.nodes().map(|node| (node.id(), node.label())).collect();
    if nodes.is_empty() {
        return GraphLayout::default();
    }

    let mut graph = LayoutGraph::with_capacity(nodes.len(), elements.len() - nodes.len());
    let index: HashMap<&str, NodeIndex> = nodes
        .iter()
        .enumerate()
        .map(|(i, (id, _))| (*id, graph.add_node(i)))
        .collect();
    let mut drawable = Vec::new();
    for edge in elements.edges() {
        let Some((source, target)) = edge.endpoints() else {
            continue;
        };
        let (Some(&s), Some(&t)) = (index.get(source), index.get(target)) else {
            continue;
        };
        if s != t {
            graph.add_edge(s, t, ());
            drawable.push((edge, source, target, s, t));
        }
    }

    let layers = assign_layers(&graph);
    let rows = order_rows(&graph, &layers);

    let widest = rows.iter().map(Vec::len).max().unwrap_or(1);
    let width = PADDING * 2.0 + widest.saturating_sub(1) as f64 * NODE_SPACING;
    let height = PADDING * 2.0 + rows.len().saturating_sub(1) as f64 * LAYER_SPACING;

    let mut coords = vec![(0.0, 0.0); nodes.len()];
    for (layer, row) in rows.iter().enumerate() {
        let row_width = row.len().saturating_sub(1) as f64 * NODE_SPACING;
        let start = (width - row_width) / 2.0;
        for (slot, node) in row.iter().enumerate() {
            let x = start + slot as f64 * NODE_SPACING;
            let y = PADDING + layer as f64 * LAYER_SPACING;
            coords[node.index()] = (x, y);
        }
    }

    let positions = nodes
        .iter()
        .enumerate()
        .map(|(i, (id, label))| NodePosition {
            id: (*id).to_owned(),
            label: (*label).to_owned(),
            x: coords[i].0,
            y: coords[i].1,
            layer: layers[i],
        })
        .collect();

    let segments = drawable
        .into_iter()
        .map(|(edge, source, target, s, t)| {
            let ((x1, y1), (x2, y2)) = trim(coords[s.index()], coords[t.index()]);
            EdgeSegment {
                id: edge.id().to_owned(),
                source: source.to_owned(),
                target: target.to_owned(),
                x1,
                y1,
                x2,
                y2,
            }
        })
        .collect();

    GraphLayout {
        nodes: positions,
        edges: segments,
        width,
        height,
    }
}

/// Groups of nodes in topological order: singletons for a DAG, strongly
/// connected components (members in input order) otherwise.
fn components(graph: &LayoutGraph) -> Vec<Vec<NodeIndex>> {
    match toposort(graph, None) {
        Ok(order) => order.into_iter().map(|node| vec![node]).collect(),
        Err(_) => {
            let mut sccs = tarjan_scc(graph);
            sccs.reverse();
            for scc in &mut sccs {
                scc.sort_unstable();
            }
            sccs
        }
    }
}

fn assign_layers(graph: &LayoutGraph) -> Vec<usize> {
    let mut layer = vec![0usize; graph.node_count()];
    let mut component_of = vec![usize::MAX; graph.node_count()];
    let mut bottom: Vec<usize> = Vec::new();

    for (id, members) in components(graph).into_iter().enumerate() {
        for node in &members {
            component_of[node.index()] = id;
        }

        let base = members
            .iter()
            .flat_map(|&node| graph.neighbors_directed(node, Direction::Incoming))
            .map(|parent| component_of[parent.index()])
            .filter(|&parent_id| parent_id != id)
            .map(|parent_id| bottom[parent_id] + 1)
            .max()
            .unwrap_or(0);

        for &node in &members {
            let offset = graph
                .neighbors_directed(node, Direction::Incoming)
                .filter(|parent| component_of[parent.index()] == id && *parent < node)
                .map(|parent| layer[parent.index()] - base + 1)
                .max()
                .unwrap_or(0);
            layer[node.index()] = base + offset;
        }

        bottom.push(members.iter().map(|node| layer[node.index()]).max().unwrap_or(base));
    }

    layer
}

#[allow(clippy::cast_precision_loss)]
fn order_rows(graph: &LayoutGraph, layers: &[usize]) -> Vec<Vec<NodeIndex>> {
    let depth = layers.iter().copied().max().unwrap_or(0) + 1;
    let mut rows: Vec<Vec<NodeIndex>> = vec![Vec::new(); depth];
    for node in graph.node_indices() {
        rows[layers[node.index()]].push(node);
    }

    let mut slot = vec![0.0f64; layers.len()];
    for row in &mut rows {
        let mut keyed: Vec<(f64, NodeIndex)> = row
            .iter()
            .map(|&node| {
                let above: Vec<f64> = graph
                    .neighbors_directed(node, Direction::Incoming)
                    .filter(|parent| layers[parent.index()] < layers[node.index()])
                    .map(|parent| slot[parent.index()])
                    .collect();
                let key = if above.is_empty() {
                    node.index() as f64
                } else {
                    above.iter().sum::<f64>() / above.len() as f64
                };
                (key, node)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        *row = keyed.into_iter().map(|(_, node)| node).collect();
        for (i, node) in row.iter().enumerate() {
            slot[node.index()] = i as f64;
        }
    }
    rows
}

fn trim(from: (f64, f64), to: (f64, f64)) -> ((f64, f64), (f64, f64)) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length <= NODE_RADIUS * 2.0 {
        return (from, to);
    }
    let (ux, uy) = (dx / length, dy / length);
    (
        (from.0 + ux * NODE_RADIUS, from.1 + uy * NODE_RADIUS),
        (to.0 - ux * NODE_RADIUS, to.1 - uy * NODE_RADIUS),
    )
}
