use serde::{Deserialize, Serialize};

use crate::types::NodeId;

/// Tolerance used when checking that a path's charges balance.
pub const CHARGE_EPSILON: f64 = 1e-9;

/// One hop of a discovered path: the node and what it is credited
/// (positive) or debited (negative) on settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub node: NodeId,
    pub charge: f64,
}

impl PathEntry {
    pub fn new(node: NodeId, charge: f64) -> Self {
        Self { node, charge }
    }
}

/// An ordered, destination-first sequence of charged hops.
///
/// The first entry is the destination, the last entry is the origin. The
/// origin's charge is the negated sum of every other charge, so a path
/// settles to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    entries: Vec<PathEntry>,
}

impl Path {
    /// Wrap destination-first entries.
    pub fn new(entries: Vec<PathEntry>) -> Self {
        Self { entries }
    }

    /// Build a path from destination-first `(node, charge)` pairs whose
    /// last element is the origin, computing the origin's charge.
    pub fn with_origin_payment(relays: Vec<PathEntry>, origin: NodeId) -> Self {
        let earned: f64 = relays.iter().map(|e| e.charge).sum();
        let mut entries = relays;
        entries.push(PathEntry::new(origin, -earned));
        Self { entries }
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PathEntry> {
        self.entries
    }

    /// Number of hops, origin and destination included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn destination(&self) -> Option<&NodeId> {
        self.entries.first().map(|e| &e.node)
    }

    pub fn origin(&self) -> Option<&NodeId> {
        self.entries.last().map(|e| &e.node)
    }

    /// Total earned by every node other than the origin.
    pub fn relay_total(&self) -> f64 {
        match self.entries.split_last() {
            Some((_, rest)) => rest.iter().map(|e| e.charge).sum(),
            None => 0.0,
        }
    }

    /// What the origin pays, as a positive number.
    pub fn origin_payment(&self) -> f64 {
        self.entries.last().map(|e| -e.charge).unwrap_or(0.0)
    }

    /// Whether the origin pays exactly what the relays earn.
    pub fn is_balanced(&self) -> bool {
        match self.entries.last() {
            Some(last) => (self.relay_total() + last.charge).abs() < CHARGE_EPSILON,
            None => false,
        }
    }

    /// Whether any node occurs more than once.
    pub fn has_repeated_node(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.entries.iter().any(|e| !seen.insert(&e.node))
    }

    /// Node ids in travel order, origin first.
    pub fn hops_in_travel_order(&self) -> Vec<&NodeId> {
        self.entries.iter().rev().map(|e| &e.node).collect()
    }

    /// Remove and return the entry holding the message next in travel
    /// order (the end of the list).
    pub fn pop_next(&mut self) -> Option<PathEntry> {
        self.entries.pop()
    }
}
