//! Relay Mesh Routing: path selection under a pay-per-hop cost model.
//!
//! This crate provides:
//! - [`Router`]: the contract every strategy implements, returning a [`RouteResult`].
//! - [`BestFirstRouter`]: centralized best-first search with a geographic heuristic.
//! - [`BiddingRouter`]: decentralized exhaustive bidding.
//! - [`BacktrackingRouter`]: decentralized greedy lookahead with full backtracking.
//! - [`utility`]: the per-hop cost metric all three share.
//! - [`SearchObserver`]: receives one event per node a search examines.

pub mod algorithm;
pub mod backtracking;
pub mod best_first;
pub mod bidding;
pub mod error;
pub mod route;
pub mod utility;
pub mod visited;


// Re-exports for convenience.
pub use algorithm::AlgorithmKind;
pub use backtracking::BacktrackingRouter;
pub use best_first::BestFirstRouter;
pub use bidding::{Bid, BiddingRouter};
pub use error::RoutingError;
pub use route::{RouteResult, Router, SearchObserver, VisitCounter};
pub use utility::{hop_charge, utility};
pub use visited::VisitedSet;
