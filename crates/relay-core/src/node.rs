use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::{Message, MessageId, NodeId};

/// Static description of a node as supplied by the topology provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    pub lat: f64,
    pub long: f64,
    /// Transmission speed figure used by the utility metric.
    pub speed: f64,
    /// Weight this node puts on speed when it sends.
    pub speed_pref: f64,
    /// Weight this node puts on price when it sends.
    pub cost_pref: f64,
    /// Initial price charged per relayed byte.
    pub price_per_byte: f64,
}

impl NodeSpec {
    /// Reject values no simulation can make sense of.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |reason: String| CoreError::InvalidNode {
            id: self.id.clone(),
            reason,
        };
        if self.id.as_str().is_empty() {
            return Err(invalid("id is empty".into()));
        }
        let fields = [
            ("lat", self.lat),
            ("long", self.long),
            ("speed", self.speed),
            ("speed_pref", self.speed_pref),
            ("cost_pref", self.cost_pref),
            ("price_per_byte", self.price_per_byte),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(format!("{} is not finite: {}", name, value)));
            }
        }
        if self.price_per_byte < 0.0 {
            return Err(invalid(format!(
                "price_per_byte is negative: {}",
                self.price_per_byte
            )));
        }
        Ok(())
    }
}

/// Per-node activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCounters {
    /// Messages this node originated.
    pub sent: u64,
    /// Exposure: distinct messages for which this node was examined by a search.
    pub seen: u64,
    /// Messages this node actually handled during settlement.
    pub transmitted: u64,
}

/// A live mesh node: static fields plus the mutable economic state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub long: f64,
    pub speed: f64,
    pub speed_pref: f64,
    pub cost_pref: f64,
    pub price_per_byte: f64,
    pub balance: f64,
    pub counters: NodeCounters,
    /// Last sequence number seen per sender, for exposure deduplication.
    last_seen: HashMap<NodeId, u64>,
}

impl Node {
    /// Build a node with a zero balance and zeroed counters.
    pub fn new(spec: NodeSpec) -> Self {
        Self {
            id: spec.id,
            lat: spec.lat,
            long: spec.long,
            speed: spec.speed,
            speed_pref: spec.speed_pref,
            cost_pref: spec.cost_pref,
            price_per_byte: spec.price_per_byte,
            balance: 0.0,
            counters: NodeCounters::default(),
            last_seen: HashMap::new(),
        }
    }

    /// Originate a message from this node.
    ///
    /// Bumps the `sent` counter and stamps the message with it, so message
    /// ids are unique per sender.
    pub fn create_message(
        &mut self,
        destination: NodeId,
        size: u64,
        content: impl Into<String>,
    ) -> Message {
        self.counters.sent += 1;
        Message {
            id: MessageId {
                sender: self.id.clone(),
                sequence: self.counters.sent,
            },
            origin: self.id.clone(),
            destination,
            speed_pref: self.speed_pref,
            cost_pref: self.cost_pref,
            size,
            content: content.into(),
        }
    }

    /// Record that a search examined this node on behalf of `message`.
    ///
    /// The `seen` counter moves at most once per distinct message id, no
    /// matter how many search branches touch the node. Returns whether the
    /// exposure was new.
    pub fn observe(&mut self, message: &MessageId) -> bool {
        match self.last_seen.get(&message.sender) {
            Some(&seq) if seq == message.sequence => false,
            _ => {
                self.last_seen
                    .insert(message.sender.clone(), message.sequence);
                self.counters.seen += 1;
                true
            }
        }
    }

    /// Price this node charges for relaying `size` bytes.
    pub fn charge_for(&self, size: u64) -> f64 {
        self.price_per_byte * size as f64
    }

    /// Observed relay rate, `transmitted / seen`, or `None` with no exposure.
    pub fn transmission_rate(&self) -> Option<f64> {
        if self.counters.seen == 0 {
            return None;
        }
        Some(self.counters.transmitted as f64 / self.counters.seen as f64)
    }

    /// Forget the current pricing episode.
    pub fn reset_episode(&mut self) {
        self.counters.seen = 0;
        self.counters.transmitted = 0;
    }
}
