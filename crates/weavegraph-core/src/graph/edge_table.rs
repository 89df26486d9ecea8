use std::collections::{HashMap, HashSet};

use crate::graph::{edges::Edge, error::GraphError, ids::NodeId};

/// Adjacency model of the search graph: vertex -> outgoing edges.
///
/// Every node that is the root or the destination of a resolved edge has an
/// entry, possibly empty. Edges of one vertex keep insertion order so that
/// iteration stays deterministic.
#[derive(Debug, Clone)]
pub struct EdgeTable<A> {
    adjacency: HashMap<NodeId, Vec<Edge<A>>>,
}

impl<A> Default for EdgeTable<A> {
    fn default() -> Self {
        EdgeTable {
            adjacency: HashMap::new(),
        }
    }
}

impl<A: PartialEq> EdgeTable<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `node_id` has an (initially empty) edge list. Idempotent.
    pub fn add_vertex(&mut self, node_id: NodeId) {
        self.adjacency.entry(node_id).or_default();
    }

    pub fn contains_vertex(&self, node_id: NodeId) -> bool {
        self.adjacency.contains_key(&node_id)
    }

    /// Number of vertices known to the table.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add or complete the edge `source --action--> destination`.
    ///
    /// A `None` destination records a pending edge: the action is known but
    /// has not been tried. Completing an existing edge keeps its statistics.
    /// Fails with `CycleDetected` if `destination` already reaches `source`.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        destination: Option<NodeId>,
        action: A,
    ) -> Result<(), GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::MissingVertex { node_id: source });
        }

        if let Some(destination) = destination {
            if self.path_exists(destination, source) {
                return Err(GraphError::CycleDetected {
                    origin: source,
                    destination,
                });
            }
        }

        let edges = self
            .adjacency
            .get_mut(&source)
            .ok_or(GraphError::MissingVertex { node_id: source })?;

        match edges.iter_mut().find(|edge| *edge.action() == action) {
            Some(edge) => {
                if let Some(destination) = destination {
                    edge.set_destination(destination);
                }
            }
            None => edges.push(Edge::new(action, destination)),
        }

        if let Some(destination) = destination {
            self.add_vertex(destination);
        }
        Ok(())
    }

    /// Outgoing edges of `node_id`; empty for an unknown vertex.
    pub fn edges(&self, node_id: NodeId) -> &[Edge<A>] {
        self.adjacency
            .get(&node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find the edge for `action` leaving `node_id`.
    pub fn edge(&self, node_id: NodeId, action: &A) -> Option<&Edge<A>> {
        self.edges(node_id)
            .iter()
            .find(|edge| edge.action() == action)
    }

    /// Sum of visits over the outgoing edges of `node_id`.
    pub fn total_visits(&self, node_id: NodeId) -> u64 {
        self.edges(node_id).iter().map(Edge::visits).sum()
    }

    /// Whether a directed path over resolved edges leads from `source` to `destination`.
    /// Both must be vertices; a vertex always reaches itself.
    pub fn path_exists(&self, source: NodeId, destination: NodeId) -> bool {
        if !self.contains_vertex(source) || !self.contains_vertex(destination) {
            return false;
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![source];

        while let Some(current) = stack.pop() {
            if current == destination {
                return true;
            }
            if visited.insert(current) {
                stack.extend(self.edges(current).iter().filter_map(Edge::destination));
            }
        }
        false
    }

    /// Record `reward` on the edge `(node_id, action)`.
    ///
    /// Returns `false` if the edge was missing and had to be recreated as a
    /// fresh record; losing that edge's history is recoverable.
    pub fn record(&mut self, node_id: NodeId, action: A, reward: f64) -> bool {
        let edges = self.adjacency.entry(node_id).or_default();
        match edges.iter_mut().find(|edge| *edge.action() == action) {
            Some(edge) => {
                edge.record(reward);
                true
            }
            None => {
                let mut edge = Edge::new(action, None);
                edge.record(reward);
                edges.push(edge);
                false
            }
        }
    }

    /// Iterate all vertices with their edges, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[Edge<A>])> {
        self.adjacency
            .iter()
            .map(|(node_id, edges)| (*node_id, edges.as_slice()))
    }
}
