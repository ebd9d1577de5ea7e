use relay_core::{Message, NodeIndex, Path, PathEntry, Topology};

use crate::error::RoutingError;
use crate::route::{
    endpoints, examine, self_delivery, trace_outcome, RouteResult, Router, SearchObserver,
};
use crate::utility::{hop_charge, utility};
use crate::visited::VisitedSet;

/// A candidate sub-path offered by a node: its hops toward the destination
/// (destination-first), with their summed utility and charges.
#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub path: Vec<PathEntry>,
    pub utility: f64,
    pub cost: f64,
}

impl Bid {
    fn terminal(entry: PathEntry, utility: f64) -> Self {
        let cost = entry.charge;
        Self {
            path: vec![entry],
            utility,
            cost,
        }
    }

    /// Put the bidding node on top of the child bid it chose.
    fn extend(mut self, entry: PathEntry, utility: f64) -> Self {
        self.cost += entry.charge;
        self.utility += utility;
        self.path.push(entry);
        self
    }

    fn beats(&self, other: &Option<Bid>) -> bool {
        match other {
            Some(best) => self.utility < best.utility,
            None => true,
        }
    }
}

/// Decentralized exhaustive bidding.
///
/// No global search state: every node asked for a bid asks each unvisited
/// neighbor in turn, keeps the cheapest answer, and adds its own utility
/// and charge. Each recursive call carries its own extension of the visited
/// set, so sibling branches never see each other's visits.
///
/// This explores every simple path and is exponential in the worst case.
/// It is only meant for small meshes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiddingRouter;

impl BiddingRouter {
    pub fn new() -> Self {
        Self
    }

    fn own_entry(topology: &Topology, idx: NodeIndex, message: &Message) -> (PathEntry, f64) {
        let node = topology.node(idx);
        (
            PathEntry::new(node.id.clone(), hop_charge(message, node)),
            utility(message, node),
        )
    }

    /// The bid `current` answers with, or `None` if no unvisited branch
    /// reaches the destination.
    fn bid(
        &self,
        topology: &mut Topology,
        current: NodeIndex,
        destination: NodeIndex,
        message: &Message,
        visited: &VisitedSet,
        observer: &mut dyn SearchObserver,
    ) -> Option<Bid> {
        if current == destination {
            let (entry, utility) = Self::own_entry(topology, destination, message);
            return Some(Bid::terminal(entry, utility));
        }

        let (own, own_utility) = Self::own_entry(topology, current, message);

        // A node next to the destination answers with the one-hop bid.
        if topology.are_adjacent(current, destination) {
            examine(topology, destination, message, observer);
            let (entry, utility) = Self::own_entry(topology, destination, message);
            return Some(Bid::terminal(entry, utility).extend(own, own_utility));
        }

        let visited = visited.with(current);
        let mut best: Option<Bid> = None;
        let neighbors = topology.neighbors(current).to_vec();
        for neighbor in neighbors {
            if visited.contains(neighbor) {
                continue;
            }
            examine(topology, neighbor, message, observer);
            if let Some(offer) =
                self.bid(topology, neighbor, destination, message, &visited, observer)
            {
                if offer.beats(&best) {
                    best = Some(offer);
                }
            }
        }

        best.map(|bid| bid.extend(own, own_utility))
    }
}

impl Router for BiddingRouter {
    fn name(&self) -> &'static str {
        "bidding"
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

        let visited = VisitedSet::new().with(origin);
        let mut best: Option<Bid> = None;
        let neighbors = topology.neighbors(origin).to_vec();
        for neighbor in neighbors {
            examine(topology, neighbor, message, observer);
            if let Some(offer) =
                self.bid(topology, neighbor, destination, message, &visited, observer)
            {
                if offer.beats(&best) {
                    best = Some(offer);
                }
            }
        }

        let result = match best {
            Some(bid) => RouteResult::Found(Path::with_origin_payment(
                bid.path,
                topology.node(origin).id.clone(),
            )),
            None => RouteResult::NotFound,
        };
        trace_outcome(self.name(), message, &result);
        Ok(result)
    }
}
