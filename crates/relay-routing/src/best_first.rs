use std::cmp::Ordering;
use std::collections::BinaryHeap;

use relay_core::{Message, NodeIndex, Path, PathEntry, Topology};

use crate::error::RoutingError;
use crate::route::{
    endpoints, examine, self_delivery, trace_outcome, RouteResult, Router, SearchObserver,
};
use crate::utility::{hop_charge, utility};

/// Centralized best-first (A*-style) search over the whole topology.
///
/// Edge cost is [`utility`] of the node being entered; the heuristic is the
/// straight-line geographic distance to the destination. The two are not
/// on the same scale and utility is not a metric, so the heuristic is not
/// admissible and the returned path is best-effort, not guaranteed cheapest.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirstRouter;

/// Frontier entry. Ordered so the max-heap pops the smallest `f`, ties
/// going to the node that entered the frontier first.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    f: f64,
    order: u64,
    node: NodeIndex,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Per-search bookkeeping, indexed by arena slot.
struct SearchState {
    g: Vec<f64>,
    f: Vec<f64>,
    came_from: Vec<Option<NodeIndex>>,
    closed: Vec<bool>,
    in_frontier: Vec<bool>,
    first_seen: Vec<Option<u64>>,
    next_order: u64,
    frontier: BinaryHeap<FrontierEntry>,
}

impl SearchState {
    fn new(size: usize) -> Self {
        Self {
            g: vec![f64::INFINITY; size],
            f: vec![f64::INFINITY; size],
            came_from: vec![None; size],
            closed: vec![false; size],
            in_frontier: vec![false; size],
            first_seen: vec![None; size],
            next_order: 0,
            frontier: BinaryHeap::new(),
        }
    }

    /// Put `node` on the frontier with its current `f`. A node keeps the
    /// tie-break position it got the first time it joined.
    fn push(&mut self, node: NodeIndex) {
        let slot = node.get();
        let order = match self.first_seen[slot] {
            Some(order) => order,
            None => {
                let order = self.next_order;
                self.next_order += 1;
                self.first_seen[slot] = Some(order);
                order
            }
        };
        self.in_frontier[slot] = true;
        self.frontier.push(FrontierEntry {
            f: self.f[slot],
            order,
            node,
        });
    }

    /// Pop the live frontier member with minimum `f`, skipping entries made
    /// stale by a later improvement.
    fn pop(&mut self) -> Option<NodeIndex> {
        while let Some(entry) = self.frontier.pop() {
            let slot = entry.node.get();
            if !self.in_frontier[slot] || entry.f.to_bits() != self.f[slot].to_bits() {
                continue;
            }
            self.in_frontier[slot] = false;
            return Some(entry.node);
        }
        None
    }
}

impl BestFirstRouter {
    pub fn new() -> Self {
        Self
    }

    /// Walk predecessors back from the destination. Every non-origin node
    /// is charged `price_per_byte * size`; the origin pays their sum.
    fn reconstruct(
        &self,
        topology: &Topology,
        message: &Message,
        came_from: &[Option<NodeIndex>],
        destination: NodeIndex,
    ) -> Path {
        let mut relays = Vec::new();
        let mut current = destination;
        while let Some(prev) = came_from[current.get()] {
            let node = topology.node(current);
            relays.push(PathEntry::new(node.id.clone(), hop_charge(message, node)));
            current = prev;
        }
        Path::with_origin_payment(relays, topology.node(current).id.clone())
    }
}

impl Router for BestFirstRouter {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn route(
        &self,
        topology: &mut Topology,
        message: &Message,
        observer: &mut dyn SearchObserver,
    ) -> Result<RouteResult, RoutingError> {
        let (origin, destination) = endpoints(topology, message)?;
        if origin == destination {
            return Ok(self_delivery(message));
        }

        let mut state = SearchState::new(topology.len());
        state.g[origin.get()] = 0.0;
        state.f[origin.get()] = topology.geographic_distance(origin, destination);
        state.push(origin);

        while let Some(current) = state.pop() {
            if current == destination {
                let path = self.reconstruct(topology, message, &state.came_from, destination);
                let result = RouteResult::Found(path);
                trace_outcome(self.name(), message, &result);
                return Ok(result);
            }
            state.closed[current.get()] = true;

            let neighbors = topology.neighbors(current).to_vec();
            for neighbor in neighbors {
                let slot = neighbor.get();
                if state.closed[slot] {
                    continue;
                }
                // Attention is charged whether or not the neighbor improves.
                examine(topology, neighbor, message, observer);

                let tentative = state.g[current.get()] + utility(message, topology.node(neighbor));
                if tentative >= state.g[slot] {
                    continue;
                }
                state.came_from[slot] = Some(current);
                state.g[slot] = tentative;
                state.f[slot] = tentative + topology.geographic_distance(neighbor, destination);
                state.push(neighbor);
            }
        }

        let result = RouteResult::NotFound;
        trace_outcome(self.name(), message, &result);
        Ok(result)
    }
}
