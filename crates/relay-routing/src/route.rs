use relay_core::{Message, NodeId, NodeIndex, Path, Topology};

use crate::error::RoutingError;

/// Outcome of one route computation.
///
/// `NotFound` is an expected result, distinct from any path: the caller
/// skips settlement for that message and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    /// A non-empty, destination-first path whose charges balance.
    Found(Path),
    /// The search exhausted without reaching the destination.
    NotFound,
}

impl RouteResult {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteResult::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            RouteResult::Found(path) => Some(path),
            RouteResult::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            RouteResult::Found(path) => Some(path),
            RouteResult::NotFound => None,
        }
    }
}

/// Receives one event per node a router examines, whether or not that
/// node ends up on the chosen path.
pub trait SearchObserver {
    fn visited(&mut self, node: &NodeId);
}

/// Observer that just counts examinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitCounter {
    pub visits: usize,
}

impl SearchObserver for VisitCounter {
    fn visited(&mut self, _node: &NodeId) {
        self.visits += 1;
    }
}

/// Observer that ignores everything.
impl SearchObserver for () {
    fn visited(&mut self, _node: &NodeId) {}
}

/// A path-selection strategy.
///
/// Routers read the topology and write exposure bookkeeping into the
/// nodes they examine. That bookkeeping is not rolled back when the
/// search fails.
pub trait Router {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Find a path for `message`, or report that none exists.
    ///
    /// Returns [`RoutingError::UnknownNode`] if the message names a node
    /// the topology does not contain.
    fn route(
        &self,
        topology: &mut Topology,
        message: &Message,
        observer: &mut dyn SearchObserver,
    ) -> Result<RouteResult, RoutingError>;
}

/// Resolve a message's origin and destination.
pub(crate) fn endpoints(
    topology: &Topology,
    message: &Message,
) -> Result<(NodeIndex, NodeIndex), RoutingError> {
    let origin = topology.index_of(&message.origin)?;
    let destination = topology.index_of(&message.destination)?;
    Ok((origin, destination))
}

/// The path for a message addressed to its own origin.
pub(crate) fn self_delivery(message: &Message) -> RouteResult {
    RouteResult::Found(Path::with_origin_payment(Vec::new(), message.origin.clone()))
}

/// Charge attention for examining `idx`: one observer event, plus an
/// exposure increment on the node (deduplicated per message).
pub(crate) fn examine(
    topology: &mut Topology,
    idx: NodeIndex,
    message: &Message,
    observer: &mut dyn SearchObserver,
) {
    let node = topology.node_mut(idx);
    observer.visited(&node.id);
    node.observe(&message.id);
}

/// Log a finished search.
pub(crate) fn trace_outcome(router: &str, message: &Message, result: &RouteResult) {
    match result {
        RouteResult::Found(path) => tracing::debug!(
            algorithm = router,
            message = %message.id,
            hops = path.len(),
            cost = path.origin_payment(),
            "route found"
        ),
        RouteResult::NotFound => tracing::warn!(
            algorithm = router,
            message = %message.id,
            from = %message.origin,
            to = %message.destination,
            "no route found"
        ),
    }
}
