use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, human-readable identifier of a mesh node (e.g. `"A"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Dense index of a node inside a [`Topology`](crate::topology::Topology) arena.
///
/// Only meaningful for the topology that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// The raw arena slot.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Globally unique message identifier: the origin node plus that node's
/// per-node send sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId {
    /// The node that created the message.
    pub sender: NodeId,
    /// The sender's `sent` counter at creation time (starts at 1).
    pub sequence: u64,
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.sender, self.sequence)
    }
}

/// A message travelling through the mesh.
///
/// Created by the origin node, consumed once fully settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub origin: NodeId,
    pub destination: NodeId,
    /// Sender's weight on relay speed.
    pub speed_pref: f64,
    /// Sender's weight on relay price.
    pub cost_pref: f64,
    /// Payload size in bytes.
    pub size: u64,
    pub content: String,
}

impl Message {
    /// Payload size as a float, for cost arithmetic.
    pub fn size_f64(&self) -> f64 {
        self.size as f64
    }
}
