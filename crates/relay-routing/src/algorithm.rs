use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backtracking::BacktrackingRouter;
use crate::best_first::BestFirstRouter;
use crate::bidding::BiddingRouter;
use crate::error::RoutingError;
use crate::route::Router;

/// The interchangeable path-selection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Centralized best-first search with a geographic heuristic.
    BestFirst,
    /// Decentralized exhaustive bidding.
    Bidding,
    /// Decentralized greedy lookahead with backtracking.
    Backtracking,
}

impl AlgorithmKind {
    /// Every strategy, in comparison order.
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::BestFirst,
        AlgorithmKind::Bidding,
        AlgorithmKind::Backtracking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmKind::BestFirst => "best-first",
            AlgorithmKind::Bidding => "bidding",
            AlgorithmKind::Backtracking => "backtracking",
        }
    }

    /// A fresh router for this strategy.
    pub fn router(&self) -> Box<dyn Router> {
        match self {
            AlgorithmKind::BestFirst => Box::new(BestFirstRouter::new()),
            AlgorithmKind::Bidding => Box::new(BiddingRouter::new()),
            AlgorithmKind::Backtracking => Box::new(BacktrackingRouter::new()),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best-first" | "a-star" | "astar" | "a*" => Ok(AlgorithmKind::BestFirst),
            "bidding" | "agent" => Ok(AlgorithmKind::Bidding),
            "backtracking" | "approximation" | "greedy" => Ok(AlgorithmKind::Backtracking),
            other => Err(RoutingError::UnknownAlgorithm(other.to_string())),
        }
    }
}
