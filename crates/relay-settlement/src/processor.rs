use relay_core::{Message, NodeId, Path, Topology};
use serde::{Deserialize, Serialize};

use crate::error::SettlementError;
use crate::pricing::{PriceAdjustment, PriceController, PricingPolicy};

/// One node's part in a settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopSettlement {
    pub node: NodeId,
    /// Amount applied to the node's balance (negative for the origin).
    pub charge: f64,
    /// Balance after the charge.
    pub balance: f64,
    pub adjustment: PriceAdjustment,
}

/// Record of a completed settlement, hops in travel order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub message: relay_core::MessageId,
    pub hops: Vec<HopSettlement>,
}

impl SettlementReceipt {
    /// Net balance change across all hops; zero for a balanced path.
    pub fn net_flow(&self) -> f64 {
        self.hops.iter().map(|h| h.charge).sum()
    }

    pub fn price_changes(&self) -> usize {
        self.hops.iter().filter(|h| h.adjustment.is_change()).count()
    }
}

/// Replays a routed path hop by hop, moving balances and letting each
/// touched node re-price itself.
#[derive(Debug, Clone, Default)]
pub struct SettlementProcessor<P = PriceController> {
    policy: P,
}

impl<P: PricingPolicy> SettlementProcessor<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Settle `path` for `message`.
    ///
    /// Entries are consumed from the end of the destination-first list, so
    /// nodes are visited in travel order starting at the origin. Each node's
    /// balance moves by its charge, its `transmitted` counter goes up, and the
    /// pricing policy runs. Stops once the destination has been settled.
    ///
    /// If the path runs out first, the hops already applied stay applied and
    /// [`SettlementError::MalformedPath`] is returned.
    pub fn settle(
        &self,
        topology: &mut Topology,
        message: &Message,
        mut path: Path,
    ) -> Result<SettlementReceipt, SettlementError> {
        let mut hops = Vec::with_capacity(path.len());

        while let Some(entry) = path.pop_next() {
            let node = topology.get_mut(&entry.node)?;
            node.balance += entry.charge;
            node.counters.transmitted += 1;
            let adjustment = self.policy.adjust(node);
            tracing::trace!(
                message = %message.id,
                node = %node.id,
                charge = entry.charge,
                balance = node.balance,
                "settled hop"
            );
            hops.push(HopSettlement {
                node: entry.node.clone(),
                charge: entry.charge,
                balance: node.balance,
                adjustment,
            });

            if entry.node == message.destination {
                return Ok(SettlementReceipt {
                    message: message.id.clone(),
                    hops,
                });
            }
        }

        let reason = if hops.is_empty() {
            "path is empty".to_string()
        } else {
            format!("path ended after {} hops without reaching {}", hops.len(), message.destination)
        };
        tracing::error!(message = %message.id, %reason, "malformed path");
        Err(SettlementError::MalformedPath {
            message: message.id.clone(),
            reason,
        })
    }
}
