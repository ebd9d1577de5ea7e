//! Scenario configuration: the mesh, the pricing rules, and the batch of
//! sends to replay.

use relay_core::{NodeId, NodeSpec, PricingConfig, Topology};
use relay_routing::AlgorithmKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SimError;

/// How algorithms share the network during a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Each algorithm replays the whole batch on its own copy of the
    /// initial network.
    #[default]
    Isolated,
    /// One shared network; every request is sent once per algorithm, in
    /// algorithm order, before moving to the next request.
    Interleaved,
}

/// One request from the batch driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub start: NodeId,
    pub end: NodeId,
    pub size: u64,
    #[serde(default)]
    pub content: String,
}

/// Full scenario file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    /// Undirected adjacency as id pairs.
    #[serde(default)]
    pub edges: Vec<(NodeId, NodeId)>,

    #[serde(default)]
    pub sends: Vec<SendRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Algorithms to compare, in order.
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<AlgorithmKind>,
    #[serde(default)]
    pub mode: ComparisonMode,
    /// Balance magnitude at which a node counts as a strong creditor or
    /// debtor in the report.
    #[serde(default = "default_strong_balance")]
    pub strong_balance: f64,
    /// Seed for generated workloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_algorithms() -> Vec<AlgorithmKind> {
    AlgorithmKind::ALL.to_vec()
}
fn default_strong_balance() -> f64 {
    1.0
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithms: default_algorithms(),
            mode: ComparisonMode::default(),
            strong_balance: default_strong_balance(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, SimError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: ScenarioConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the scenario to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), SimError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check the scenario is runnable.
    pub fn validate(&self) -> Result<(), SimError> {
        self.pricing.validate()?;
        if self.simulation.algorithms.is_empty() {
            return Err(SimError::InvalidScenario("no algorithms selected".into()));
        }
        if !(self.simulation.strong_balance > 0.0) {
            return Err(SimError::InvalidScenario(format!(
                "strong_balance must be positive, got {}",
                self.simulation.strong_balance
            )));
        }
        let floor = self.pricing.price_floor;
        if let Some(node) = self.nodes.iter().find(|n| n.price_per_byte < floor) {
            return Err(SimError::InvalidScenario(format!(
                "node {} starts at price {} below the floor {}",
                node.id, node.price_per_byte, floor
            )));
        }
        let topology = self.topology()?;
        for (i, send) in self.sends.iter().enumerate() {
            for id in [&send.start, &send.end] {
                if !topology.contains(id) {
                    return Err(SimError::InvalidScenario(format!(
                        "send #{} references unknown node {}",
                        i + 1,
                        id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the initial network described by this scenario.
    pub fn topology(&self) -> Result<Topology, SimError> {
        Ok(Topology::from_parts(
            self.nodes.iter().cloned(),
            self.edges.iter().cloned(),
        )?)
    }

    /// A small demonstration mesh: two routes across a ring with a cheap
    /// chord, and a batch that hammers one corridor so prices move.
    pub fn sample() -> Self {
        let node = |id: &str, lat: f64, long: f64, speed: f64, price: f64| NodeSpec {
            id: NodeId::new(id),
            lat,
            long,
            speed,
            speed_pref: 0.5,
            cost_pref: 0.5,
            price_per_byte: price,
        };
        let edge = |a: &str, b: &str| (NodeId::new(a), NodeId::new(b));
        let send = |start: &str, end: &str, size: u64| SendRequest {
            start: NodeId::new(start),
            end: NodeId::new(end),
            size,
            content: "Hello!".into(),
        };

        let mut sends = vec![
            send("A", "D", 1),
            send("D", "F", 2),
            send("B", "E", 1),
            send("C", "A", 1),
            send("F", "B", 1),
        ];
        sends.extend(std::iter::repeat_with(|| send("A", "D", 1)).take(10));

        Self {
            nodes: vec![
                node("A", 40.0, -75.0, 1.0, 0.3),
                node("B", 41.0, -74.0, 2.0, 0.2),
                node("C", 42.0, -73.0, 1.5, 0.4),
                node("D", 43.0, -72.0, 1.0, 0.3),
                node("E", 41.0, -72.5, 0.5, 0.6),
                node("F", 40.0, -72.0, 1.0, 0.1),
            ],
            edges: vec![
                edge("A", "B"),
                edge("B", "C"),
                edge("C", "D"),
                edge("D", "F"),
                edge("F", "E"),
                edge("E", "A"),
                edge("B", "E"),
            ],
            sends,
            ..Self::default()
        }
    }
}
