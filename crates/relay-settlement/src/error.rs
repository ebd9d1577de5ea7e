use relay_core::{CoreError, MessageId};

/// Settlement-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// The path ended, or was empty, before the destination was reached.
    /// A conforming router never produces one.
    #[error("malformed path for message {message}: {reason}")]
    MalformedPath { message: MessageId, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
