//! Relay Mesh Settlement
//!
//! Replays routed paths hop by hop: the origin pays, every relay and the
//! receiver are credited, and each touched node's price controller gets a
//! chance to re-price.

pub mod error;
pub mod pricing;
pub mod processor;

pub use error::SettlementError;
pub use pricing::{PriceAdjustment, PriceController, PricingPolicy};
pub use processor::{HopSettlement, SettlementProcessor, SettlementReceipt};
