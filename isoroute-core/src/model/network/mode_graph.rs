//! Per-mode weighted view of the road network

use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::components::Segment;
use crate::{Minutes, Mode, SegmentId, VertexId};

/// Graph edge: one segment usable by the graph's mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeEdge {
    pub segment: SegmentId,
    pub cost: Minutes,
    pub length_km: f64,
}

/// Undirected multigraph of the segments a mode may traverse.
///
/// Only vertices incident to at least one applicable segment are inserted,
/// so every node has degree >= 1.
#[derive(Debug, Clone)]
pub struct ModeGraph {
    mode: Mode,
    pub(crate) graph: UnGraph<VertexId, ModeEdge>,
    nodes: HashMap<VertexId, NodeIndex>,
}

impl ModeGraph {
    pub(crate) fn build(mode: Mode, segments: &[Segment]) -> Self {
        let mut graph = UnGraph::default();
        let mut nodes: HashMap<VertexId, NodeIndex> = HashMap::new();

        for segment in segments {
            let Some(cost) = segment.cost(mode) else {
                continue;
            };

            let source = *nodes
                .entry(segment.source)
                .or_insert_with(|| graph.add_node(segment.source));
            let target = *nodes
                .entry(segment.target)
                .or_insert_with(|| graph.add_node(segment.target));

            graph.add_edge(
                source,
                target,
                ModeEdge {
                    segment: segment.id,
                    cost,
                    length_km: segment.length_km,
                },
            );
        }

        Self { mode, graph, nodes }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn node(&self, vertex: VertexId) -> Option<NodeIndex> {
        self.nodes.get(&vertex).copied()
    }

    pub fn vertex(&self, node: NodeIndex) -> VertexId {
        self.graph[node]
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.nodes.contains_key(&vertex)
    }

    pub(crate) fn edge(&self, edge: EdgeIndex) -> &ModeEdge {
        &self.graph[edge]
    }

    /// Edges incident to `node` as `(neighbor, edge index, edge)`.
    /// A self-loop yields `node` as its own neighbor.
    pub(crate) fn incident(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (NodeIndex, EdgeIndex, &ModeEdge)> + '_ {
        self.graph.edges(node).map(move |edge| {
            let neighbor = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            (neighbor, edge.id(), edge.weight())
        })
    }

    /// Neighbors of a vertex with the connecting segments
    pub fn neighbors(&self, vertex: VertexId) -> Vec<(VertexId, ModeEdge)> {
        self.node(vertex)
            .map(|node| {
                self.incident(node)
                    .map(|(next, _, edge)| (self.vertex(next), *edge))
                    .collect()
            })
            .unwrap_or_default()
    }
}
