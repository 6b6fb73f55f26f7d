use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::network::network_graph::NetworkGraph;
use crate::domain::utils::id::EdgeId;

/// A resolved path through the edge graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Ordered edges, both endpoints included.
    pub edges: Vec<EdgeId>,
    /// Sum of link weights traversed, i.e. the lengths of every edge after the first.
    pub weight: f64,
}

/// Frontier entry of the search.
#[derive(Debug, Clone, PartialEq)]
struct State {
    distance: f64,
    edge: EdgeId,
}

impl Eq for State {}

// BinaryHeap is a max-heap: invert both keys so the closest edge, then the
// lexicographically smallest id, is popped first.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.total_cmp(&self.distance).then_with(|| other.edge.cmp(&self.edge))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra search from `start` to `target` over link weights.
///
/// Equal-distance candidates are settled in edge id order and a predecessor is only
/// replaced by a strictly shorter alternative, so results do not depend on hash order.
/// Returns `None` if `target` is unreachable.
pub fn shortest_path(graph: &NetworkGraph, start: &EdgeId, target: &EdgeId) -> Option<ShortestPath> {
    let mut distances: HashMap<EdgeId, f64> = HashMap::new();
    let mut predecessors: HashMap<EdgeId, EdgeId> = HashMap::new();
    let mut settled: HashSet<EdgeId> = HashSet::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start.clone(), 0.0);
    queue.push(State { distance: 0.0, edge: start.clone() });

    while let Some(State { distance, edge }) = queue.pop() {
        if !settled.insert(edge.clone()) {
            continue;
        }

        if &edge == target {
            return Some(ShortestPath { edges: unwind(&predecessors, start, target), weight: distance });
        }

        for link in graph.successors(&edge) {
            if settled.contains(&link.target) {
                continue;
            }

            let next_distance = distance + link.weight;
            let improves = distances.get(&link.target).is_none_or(|&known| next_distance < known);

            if improves {
                distances.insert(link.target.clone(), next_distance);
                predecessors.insert(link.target.clone(), edge.clone());
                queue.push(State { distance: next_distance, edge: link.target.clone() });
            }
        }
    }

    log::debug!("NoPathFound: {} => {}", start, target);
    None
}

fn unwind(predecessors: &HashMap<EdgeId, EdgeId>, start: &EdgeId, target: &EdgeId) -> Vec<EdgeId> {
    let mut path = vec![target.clone()];
    let mut current = target;

    while current != start {
        match predecessors.get(current) {
            Some(previous) => {
                path.push(previous.clone());
                current = previous;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

/// Full route `start -> parking_edge -> exit`.
///
/// Both legs are resolved independently and joined at `parking_edge`, which appears
/// once. Returns `None` if either leg is unreachable.
pub fn resolve_parking_route(graph: &NetworkGraph, start: &EdgeId, parking_edge: &EdgeId, exit: &EdgeId) -> Option<ShortestPath> {
    let to_parking = shortest_path(graph, start, parking_edge)?;
    let to_exit = shortest_path(graph, parking_edge, exit)?;

    let mut edges = to_parking.edges;
    edges.extend(to_exit.edges.into_iter().skip(1));

    Some(ShortestPath { edges, weight: to_parking.weight + to_exit.weight })
}
