use std::collections::HashMap;
use std::time::{Duration, Instant};

use relay_core::NodeId;
use relay_routing::{AlgorithmKind, SearchObserver};
use serde::{Deserialize, Serialize};

/// Brackets a single send: counts every node the router examines and
/// remembers when the send began.
#[derive(Debug)]
pub struct SendTracker {
    visits: usize,
    started: Instant,
}

impl SendTracker {
    pub fn visits(&self) -> usize {
        self.visits
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl SearchObserver for SendTracker {
    fn visited(&mut self, _node: &NodeId) {
        self.visits += 1;
    }
}

/// Aggregated search effort for one algorithm over a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub algorithm: AlgorithmKind,
    /// Sends that produced a path, settled or not.
    pub sends: usize,
    /// Sends whose search came back empty.
    pub not_found: usize,
    /// Sends whose path could not be settled.
    pub failed_settlements: usize,
    pub visits_total: usize,
    /// Running sum of visits / path length over successful sends.
    pub attention_total: f64,
    pub path_length_total: usize,
    /// Time spent inside sends, summed.
    pub send_time: Duration,
    /// Wall-clock time for the whole batch.
    pub batch_time: Duration,
    /// Network-wide mean price once the batch finished.
    pub average_price: Option<f64>,
}

impl AlgorithmMetrics {
    fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            sends: 0,
            not_found: 0,
            failed_settlements: 0,
            visits_total: 0,
            attention_total: 0.0,
            path_length_total: 0,
            send_time: Duration::ZERO,
            batch_time: Duration::ZERO,
            average_price: None,
        }
    }

    /// Mean visits per path entry, over successful sends.
    pub fn average_attention(&self) -> Option<f64> {
        (self.sends > 0).then(|| self.attention_total / self.sends as f64)
    }

    pub fn average_path_length(&self) -> Option<f64> {
        (self.sends > 0).then(|| self.path_length_total as f64 / self.sends as f64)
    }

    /// Sends whose path was found and fully settled.
    pub fn delivered(&self) -> usize {
        self.sends.saturating_sub(self.failed_settlements)
    }

    /// Every send attempted, whatever its outcome.
    pub fn attempts(&self) -> usize {
        self.sends + self.not_found
    }
}

/// Collects per-algorithm search effort across a batch of sends.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    order: Vec<AlgorithmKind>,
    metrics: HashMap<AlgorithmKind, AlgorithmMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start bracketing a send.
    pub fn begin_send(&self) -> SendTracker {
        SendTracker {
            visits: 0,
            started: Instant::now(),
        }
    }

    /// Finish bracketing a send. `path_len` is `None` when no path was found.
    pub fn end_send(&mut self, algorithm: AlgorithmKind, tracker: SendTracker, path_len: Option<usize>) {
        let elapsed = tracker.elapsed();
        let entry = self.entry(algorithm);
        entry.visits_total += tracker.visits;
        entry.send_time += elapsed;
        match path_len {
            Some(len) if len > 0 => {
                entry.sends += 1;
                entry.attention_total += tracker.visits as f64 / len as f64;
                entry.path_length_total += len;
            }
            _ => entry.not_found += 1,
        }
    }

    /// A path was found but settlement rejected it.
    pub fn record_settlement_failure(&mut self, algorithm: AlgorithmKind) {
        self.entry(algorithm).failed_settlements += 1;
    }

    /// Close out a batch for `algorithm`.
    pub fn record_batch(&mut self, algorithm: AlgorithmKind, elapsed: Duration, average_price: f64) {
        let entry = self.entry(algorithm);
        entry.batch_time += elapsed;
        entry.average_price = Some(average_price);
    }

    pub fn get(&self, algorithm: AlgorithmKind) -> Option<&AlgorithmMetrics> {
        self.metrics.get(&algorithm)
    }

    /// Results in the order algorithms were first seen.
    pub fn into_results(mut self) -> Vec<AlgorithmMetrics> {
        self.order
            .iter()
            .filter_map(|kind| self.metrics.remove(kind))
            .collect()
    }

    fn entry(&mut self, algorithm: AlgorithmKind) -> &mut AlgorithmMetrics {
        let order = &mut self.order;
        self.metrics.entry(algorithm).or_insert_with(|| {
            order.push(algorithm);
            AlgorithmMetrics::new(algorithm)
        })
    }
}
