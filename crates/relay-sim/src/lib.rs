//! Relay Mesh simulator.
//!
//! Loads a scenario, replays its batch of sends through the selected
//! routers, settles every delivery, and reports per-algorithm search effort
//! alongside the final balances of the network.

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod report;
pub mod workload;

pub use config::{ComparisonMode, LoggingConfig, ScenarioConfig, SendRequest, SimulationConfig};
pub use error::SimError;
pub use metrics::{AlgorithmMetrics, MetricsCollector, SendTracker};
pub use network::{Network, SendOutcome, Simulation};
pub use report::{BalanceTier, BatchReport, NetworkSnapshot, NodeBalance};
pub use workload::{generate, WorkloadSpec};
