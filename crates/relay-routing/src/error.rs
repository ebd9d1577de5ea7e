use relay_core::{CoreError, NodeId};

/// Errors that abort a route computation.
///
/// Failing to reach the destination is not an error; it is
/// [`RouteResult::NotFound`](crate::route::RouteResult::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("message references unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("unknown routing algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Core(CoreError),
}

impl From<CoreError> for RoutingError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownNode(id) => RoutingError::UnknownNode(id),
            other => RoutingError::Core(other),
        }
    }
}
