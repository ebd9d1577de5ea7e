use relay_core::{Message, NodeIndex, Path, PathEntry, Topology};

use crate::error::RoutingError;
use crate::route::{
    endpoints, examine, self_delivery, trace_outcome, RouteResult, Router, SearchObserver,
};
use crate::utility::{hop_charge, utility};
use crate::visited::VisitedSet;

/// Approximation reported for a neighbor that is the destination itself.
pub const DESTINATION_APPROXIMATION: f64 = -1.0;

/// Decentralized greedy search with full backtracking.
///
/// Each node ranks its unvisited neighbors by a cheap lookahead,
/// `utility + geographic distance to the destination`, and descends into the
/// best one. A subtree that dead-ends is discarded and the next-ranked
/// neighbor is tried; a node reports failure only when every candidate is
/// exhausted.
///
/// Charges are filled in while unwinding a successful branch. The origin's
/// charge, the negated sum of everything below it, is computed only at the
/// frame whose node is the message origin.
///
/// The visited set is per branch, so an unreachable destination makes the
/// search walk every simple path out of the origin before giving up. That
/// is factorial in the worst case; keep to small meshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingRouter;

impl BacktrackingRouter {
    pub fn new() -> Self {
        Self
    }

    /// Lookahead estimate for stepping onto `neighbor`.
    pub fn approximation(
        topology: &Topology,
        message: &Message,
        neighbor: NodeIndex,
        destination: NodeIndex,
    ) -> f64 {
        if neighbor == destination {
            return DESTINATION_APPROXIMATION;
        }
        utility(message, topology.node(neighbor))
            + topology.geographic_distance(neighbor, destination)
    }

    /// Unvisited neighbors of `current`, best candidate first. The
    /// destination always ranks first; ties keep adjacency order.
    fn ranked_candidates(
        topology: &mut Topology,
        current: NodeIndex,
        destination: NodeIndex,
        message: &Message,
        visited: &VisitedSet,
        observer: &mut dyn SearchObserver,
    ) -> Vec<NodeIndex> {
        let neighbors = topology.neighbors(current).to_vec();
        let mut ranked: Vec<(bool, f64, NodeIndex)> = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            if visited.contains(neighbor) {
                continue;
            }
            examine(topology, neighbor, message, observer);
            let estimate = Self::approximation(topology, message, neighbor, destination);
            ranked.push((neighbor != destination, estimate, neighbor));
        }
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));
        ranked.into_iter().map(|(_, _, idx)| idx).collect()
    }

    /// Destination-first hops from `current` to the destination, or `None`
    /// once every ranked candidate has failed.
    fn explore(
        &self,
        topology: &mut Topology,
        current: NodeIndex,
        origin: NodeIndex,
        destination: NodeIndex,
        message: &Message,
        visited: &VisitedSet,
        observer: &mut dyn SearchObserver,
    ) -> Option<Vec<PathEntry>> {
        if current == destination {
            let node = topology.node(current);
            return Some(vec![PathEntry::new(node.id.clone(), hop_charge(message, node))]);
        }

        let visited = visited.with(current);
        let candidates =
            Self::ranked_candidates(topology, current, destination, message, &visited, observer);

        for candidate in candidates {
            let Some(mut hops) = self.explore(
                topology,
                candidate,
                origin,
                destination,
                message,
                &visited,
                observer,
            ) else {
                continue;
            };

            let node = topology.node(current);
            let charge = if current == origin {
                -hops.iter().map(|e| e.charge).sum::<f64>()
            } else {
                hop_charge(message, node)
            };
            hops.push(PathEntry::new(node.id.clone(), charge));
            return Some(hops);
        }

        None
    }
}

impl Router for BacktrackingRouter {
    fn name(&self) -> &'static str {
        "backtracking"
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

        let result = match self.explore(
            topology,
            origin,
            origin,
            destination,
            message,
            &VisitedSet::new(),
            observer,
        ) {
            Some(hops) => RouteResult::Found(Path::new(hops)),
            None => RouteResult::NotFound,
        };
        trace_outcome(self.name(), message, &result);
        Ok(result)
    }
}
