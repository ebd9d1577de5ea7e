use crate::types::NodeId;

/// Core relay-mesh errors.
///
/// These signal defects in the data handed to the core (usually by the
/// topology provider), not recoverable routing conditions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("invalid node {id}: {reason}")]
    InvalidNode { id: NodeId, reason: String },

    #[error("invalid edge {from} <-> {to}: {reason}")]
    InvalidEdge {
        from: NodeId,
        to: NodeId,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
