use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::model::RoadNetwork;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap); equal costs
// fall back to the node index so the exploration order is deterministic.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra search from `start` to `target` over edge lengths.
///
/// Returns the node sequence of the optimal path and its total length,
/// or `None` when the target is unreachable. Requires non-negative edge
/// weights, which the network guarantees at construction.
pub(crate) fn search(
    network: &RoadNetwork,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<(Vec<NodeIndex>, f64)> {
    let estimated = network.node_count().min(1024);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated);
    let mut heap = BinaryHeap::with_capacity(estimated / 4);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Skip if we've already found a better path.
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().length;

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    let total = *distances.get(&target)?;
    if target != start && !predecessors.contains_key(&target) {
        return None;
    }

    // Follow predecessors backward from the target, then flip.
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        path.push(current);
    }
    path.reverse();

    Some((path, total))
}
