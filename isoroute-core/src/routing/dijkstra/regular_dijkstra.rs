use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::state::State;
use crate::Minutes;
use crate::model::ModeGraph;

/// Dijkstra's algorithm over a mode graph.
/// Returns travel minutes from `start` for every node reached within
/// `max_cost`; labels above the bound are never pushed.
pub fn dijkstra_path_weights(
    graph: &ModeGraph,
    start: NodeIndex,
    max_cost: Option<Minutes>,
) -> HashMap<NodeIndex, Minutes> {
    let mut distances: HashMap<NodeIndex, Minutes> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Skip stale heap entries
        if let Some(&best) = distances.get(&node)
            && cost > best
        {
            continue;
        }

        for (next, _, edge) in graph.incident(node) {
            let next_cost = cost + edge.cost;
            if let Some(max) = max_cost
                && next_cost > max
            {
                continue;
            }

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}
