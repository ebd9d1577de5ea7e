use relay_core::CoreError;
use relay_routing::RoutingError;
use relay_settlement::SettlementError;

/// Simulator errors.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to write scenario: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}
