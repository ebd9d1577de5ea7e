use std::fmt::{self, Write as _};

use chrono::{DateTime, Utc};
use relay_core::{NodeId, Topology};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ComparisonMode;
use crate::error::SimError;
use crate::metrics::AlgorithmMetrics;

/// Five-way classification of a final balance around zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BalanceTier {
    StrongDebit,
    Debit,
    Neutral,
    Credit,
    StrongCredit,
}

impl BalanceTier {
    /// Classify `balance`; magnitudes at or beyond `strong` land in the
    /// outer tiers.
    pub fn classify(balance: f64, strong: f64) -> Self {
        if balance.abs() < relay_core::CHARGE_EPSILON {
            BalanceTier::Neutral
        } else if balance >= strong {
            BalanceTier::StrongCredit
        } else if balance > 0.0 {
            BalanceTier::Credit
        } else if balance <= -strong {
            BalanceTier::StrongDebit
        } else {
            BalanceTier::Debit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceTier::StrongDebit => "strong-debit",
            BalanceTier::Debit => "debit",
            BalanceTier::Neutral => "neutral",
            BalanceTier::Credit => "credit",
            BalanceTier::StrongCredit => "strong-credit",
        }
    }
}

impl fmt::Display for BalanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBalance {
    pub id: NodeId,
    pub balance: f64,
    pub price_per_byte: f64,
    pub tier: BalanceTier,
}

/// Final state of one network after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Algorithm name in isolated runs, `shared` otherwise.
    pub label: String,
    pub average_price: f64,
    /// Sum of all balances; zero unless settlement was interrupted.
    pub total_balance: f64,
    pub nodes: Vec<NodeBalance>,
}

impl NetworkSnapshot {
    pub fn capture(label: impl Into<String>, topology: &Topology, strong: f64) -> Self {
        let nodes = topology
            .nodes()
            .map(|n| NodeBalance {
                id: n.id.clone(),
                balance: n.balance,
                price_per_byte: n.price_per_byte,
                tier: BalanceTier::classify(n.balance, strong),
            })
            .collect();
        Self {
            label: label.into(),
            average_price: topology.average_price(),
            total_balance: topology.total_balance(),
            nodes,
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&NodeBalance> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

/// Everything a batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub mode: ComparisonMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub requests: usize,
    pub metrics: Vec<AlgorithmMetrics>,
    pub networks: Vec<NetworkSnapshot>,
}

impl BatchReport {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable summary.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Run {}", self.run_id);
        let _ = writeln!(
            out,
            "  mode: {:?}, requests: {}, started: {}, took: {} ms",
            self.mode,
            self.requests,
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            (self.finished_at - self.started_at).num_milliseconds()
        );

        for m in &self.metrics {
            let _ = writeln!(out);
            let _ = writeln!(out, "[{}]", m.algorithm);
            let _ = writeln!(
                out,
                "  paths found: {}  delivered: {}  not found: {}  settlement failures: {}",
                m.sends,
                m.delivered(),
                m.not_found,
                m.failed_settlements
            );
            let _ = writeln!(out, "  visits: {}", m.visits_total);
            let _ = writeln!(out, "  attention total: {:.3}", m.attention_total);
            if let Some(avg) = m.average_attention() {
                let _ = writeln!(out, "  average attention: {:.3}", avg);
            }
            if let Some(avg) = m.average_path_length() {
                let _ = writeln!(out, "  average path length: {:.2}", avg);
            }
            let _ = writeln!(out, "  batch time: {:.3} ms", m.batch_time.as_secs_f64() * 1e3);
            if let Some(price) = m.average_price {
                let _ = writeln!(out, "  average price: {:.4}", price);
            }
        }

        for net in &self.networks {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Balances ({}), average price {:.4}, net {:+.6}",
                net.label, net.average_price, net.total_balance
            );
            for n in &net.nodes {
                let _ = writeln!(
                    out,
                    "  {:<12} {:>+12.4}  {:<13} price {:.4}",
                    n.id.as_str(),
                    n.balance,
                    n.tier,
                    n.price_per_byte
                );
            }
        }
        out
    }
}
