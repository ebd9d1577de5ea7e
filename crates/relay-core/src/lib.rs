//! Relay Mesh core: the data model shared by routing, settlement, and the
//! simulator.
//!
//! - [`Topology`]: index-addressable arena of [`Node`]s with undirected adjacency.
//! - [`Message`] / [`MessageId`]: what gets relayed, and its unique identity.
//! - [`Path`]: destination-first charged hops produced by a router.
//! - [`PricingConfig`]: tuning for the per-node price controller.

pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod topology;
pub mod types;

pub use config::PricingConfig;
pub use error::CoreError;
pub use node::{Node, NodeCounters, NodeSpec};
pub use path::{Path, PathEntry, CHARGE_EPSILON};
pub use topology::Topology;
pub use types::{Message, MessageId, NodeId, NodeIndex};
