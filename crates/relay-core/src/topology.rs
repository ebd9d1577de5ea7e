use std::collections::HashMap;

use crate::error::CoreError;
use crate::node::{Node, NodeSpec};
use crate::types::{NodeId, NodeIndex};

/// Index-addressable arena of mesh nodes plus undirected, unweighted
/// adjacency.
///
/// Node ids are stable for the lifetime of the topology; nodes are never
/// removed. Neighbor lists keep insertion order, which makes every router
/// deterministic under ties.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    adjacency: Vec<Vec<NodeIndex>>,
    index: HashMap<NodeId, NodeIndex>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from node specs and an undirected edge list.
    pub fn from_parts<I, E>(nodes: I, edges: E) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = NodeSpec>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut topology = Self::new();
        for spec in nodes {
            topology.add_node(spec)?;
        }
        for (a, b) in edges {
            topology.add_edge(&a, &b)?;
        }
        Ok(topology)
    }

    /// Add a node. Fails if the id is already present or the spec is invalid.
    pub fn add_node(&mut self, spec: NodeSpec) -> Result<NodeIndex, CoreError> {
        spec.validate()?;
        if self.index.contains_key(&spec.id) {
            return Err(CoreError::DuplicateNode(spec.id));
        }
        let idx = NodeIndex(self.nodes.len());
        self.index.insert(spec.id.clone(), idx);
        self.nodes.push(Node::new(spec));
        self.adjacency.push(Vec::new());
        Ok(idx)
    }

    /// Connect two existing nodes. Repeated edges are ignored.
    pub fn add_edge(&mut self, a: &NodeId, b: &NodeId) -> Result<(), CoreError> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return Err(CoreError::InvalidEdge {
                from: a.clone(),
                to: b.clone(),
                reason: "self-loop".into(),
            });
        }
        if self.adjacency[ia.0].contains(&ib) {
            tracing::debug!(from = %a, to = %b, "ignoring repeated edge");
            return Ok(());
        }
        self.adjacency[ia.0].push(ib);
        self.adjacency[ib.0].push(ia);
        Ok(())
    }

    /// Resolve an id to its arena index. An unknown id is a hard error.
    pub fn index_of(&self, id: &NodeId) -> Result<NodeIndex, CoreError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CoreError::UnknownNode(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Node at `idx`. Panics if the index came from another topology.
    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.nodes[idx.0]
    }

    /// Mutable node at `idx`. Panics if the index came from another topology.
    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    /// Look a node up by id.
    pub fn get(&self, id: &NodeId) -> Result<&Node, CoreError> {
        let idx = self.index_of(id)?;
        Ok(&self.nodes[idx.0])
    }

    /// Look a node up by id for mutation.
    pub fn get_mut(&mut self, id: &NodeId) -> Result<&mut Node, CoreError> {
        let idx = self.index_of(id)?;
        Ok(&mut self.nodes[idx.0])
    }

    /// Neighbors of `idx` in edge insertion order.
    pub fn neighbors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.adjacency[idx.0]
    }

    /// Neighbors of a node by id.
    pub fn neighbors_of(&self, id: &NodeId) -> Result<Vec<&NodeId>, CoreError> {
        let idx = self.index_of(id)?;
        Ok(self.adjacency[idx.0]
            .iter()
            .map(|n| &self.nodes[n.0].id)
            .collect())
    }

    pub fn are_adjacent(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.adjacency[a.0].contains(&b)
    }

    /// Straight-line distance between two nodes in (lat, long) space.
    pub fn geographic_distance(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        let (na, nb) = (&self.nodes[a.0], &self.nodes[b.0]);
        let dlat = na.lat - nb.lat;
        let dlong = na.long - nb.long;
        (dlat * dlat + dlong * dlong).sqrt()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// Mean `price_per_byte` across the network, `0.0` when empty.
    pub fn average_price(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        self.nodes.iter().map(|n| n.price_per_byte).sum::<f64>() / self.nodes.len() as f64
    }

    /// Sum of all balances. Stays at zero while every settled path balances.
    pub fn total_balance(&self) -> f64 {
        self.nodes.iter().map(|n| n.balance).sum()
    }

    /// Whether `to` is reachable from `from` over undirected adjacency.
    pub fn is_reachable(&self, from: NodeIndex, to: NodeIndex) -> bool {
        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![from];
        visited[from.0] = true;
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            for &next in &self.adjacency[current.0] {
                if !visited[next.0] {
                    visited[next.0] = true;
                    stack.push(next);
                }
            }
        }
        false
    }
}
