use std::collections::HashMap;

use crate::domain::utils::id::EdgeId;
use crate::loader::network_parser::NetworkDescription;

/// Weight used for a connection whose destination edge has no known length.
const UNKNOWN_LENGTH_WEIGHT: f64 = 1.0;

/// A directed connection to a successor edge, weighted by the successor's length.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target: EdgeId,
    pub weight: f64,
}

/// Read-only edge graph of the road network.
///
/// Nodes are edges of the road network; a link `a -> b` exists whenever the
/// network declares a connection from `a` to `b`.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    edge_lengths: HashMap<EdgeId, f64>,

    /// Outgoing links per edge in document order.
    adjacency: HashMap<EdgeId, Vec<Link>>,
}

impl From<NetworkDescription> for NetworkGraph {
    fn from(description: NetworkDescription) -> Self {
        let NetworkDescription { edge_lengths, connections } = description;
        let mut adjacency: HashMap<EdgeId, Vec<Link>> = HashMap::new();

        for (from, to) in connections {
            let weight = edge_lengths.get(&to).copied().unwrap_or(UNKNOWN_LENGTH_WEIGHT);
            adjacency.entry(from).or_default().push(Link { target: to, weight });
        }

        NetworkGraph { edge_lengths, adjacency }
    }
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge_length(&self, edge: &EdgeId) -> Option<f64> {
        self.edge_lengths.get(edge).copied()
    }

    pub fn edge_lengths(&self) -> &HashMap<EdgeId, f64> {
        &self.edge_lengths
    }

    pub fn successors(&self, edge: &EdgeId) -> &[Link] {
        self.adjacency.get(edge).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_adjacent(&self, from: &EdgeId, to: &EdgeId) -> bool {
        self.successors(from).iter().any(|link| &link.target == to)
    }

    pub fn num_edges(&self) -> usize {
        self.edge_lengths.len()
    }

    /// Sum of the lengths of all edges on `route`; unknown edges count as zero.
    pub fn route_length(&self, route: &[EdgeId]) -> f64 {
        route.iter().map(|edge| self.edge_length(edge).unwrap_or(0.0)).sum()
    }

    /// Checks that every consecutive pair of `route` is a declared connection.
    pub fn is_contiguous(&self, route: &[EdgeId]) -> bool {
        route.windows(2).all(|pair| self.is_adjacent(&pair[0], &pair[1]))
    }
}
