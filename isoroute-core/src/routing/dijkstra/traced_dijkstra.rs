use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::state::State;
use crate::Minutes;
use crate::model::ModeGraph;

/// Node and edge sequence of a shortest path
#[derive(Debug, Clone, PartialEq)]
pub struct TracedPath {
    /// Visited nodes, `start` first and `target` last
    pub nodes: Vec<NodeIndex>,
    /// Traversed edges, one fewer than `nodes`
    pub edges: Vec<EdgeIndex>,
    pub cost: Minutes,
}

impl TracedPath {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Dijkstra's algorithm between two nodes of a mode graph, tracking
/// predecessors so the path can be rebuilt. Edges are traversable in
/// both directions. Returns `None` when `target` is unreachable.
pub(crate) fn shortest_path(
    graph: &ModeGraph,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<TracedPath> {
    let node_count = graph.vertex_count();
    let mut distances: HashMap<NodeIndex, Minutes> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if settled.contains(node.index()) {
            continue;
        }
        settled.insert(node.index());

        if node == target {
            break;
        }

        for (next, edge_idx, edge) in graph.incident(node) {
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge.cost;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, (node, edge_idx));
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, (node, edge_idx));
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if !settled.contains(target.index()) {
        return None;
    }

    // Follow predecessors backward from target to start
    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while current != start {
        let &(prev, edge) = predecessors.get(&current)?;
        edges.push(edge);
        nodes.push(prev);
        current = prev;
    }
    nodes.reverse();
    edges.reverse();

    Some(TracedPath {
        nodes,
        edges,
        cost: distances.get(&target).copied().unwrap_or_default(),
    })
}
