//! Batch driver: replays a scenario's sends through each selected router,
//! settling every delivered message and feeding the metrics collector.

use std::time::{Duration, Instant};

use chrono::Utc;
use relay_core::{Message, Topology};
use relay_routing::{AlgorithmKind, RouteResult, Router, SearchObserver};
use relay_settlement::{
    PriceController, PricingPolicy, SettlementError, SettlementProcessor, SettlementReceipt,
};
use uuid::Uuid;

use crate::config::{ComparisonMode, ScenarioConfig, SendRequest};
use crate::error::SimError;
use crate::metrics::MetricsCollector;
use crate::report::{BatchReport, NetworkSnapshot};

/// What happened to one send.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Delivered {
        path_len: usize,
        receipt: SettlementReceipt,
    },
    /// The router found no path; nothing was settled.
    NotFound,
    /// The router returned a path that settlement could not complete.
    SettlementFailed { path_len: usize },
}

impl SendOutcome {
    /// Path length to report, if a path was produced.
    pub fn path_len(&self) -> Option<usize> {
        match self {
            SendOutcome::Delivered { path_len, .. } | SendOutcome::SettlementFailed { path_len } => {
                Some(*path_len)
            }
            SendOutcome::NotFound => None,
        }
    }
}

/// A topology together with the settlement rules applied to it.
#[derive(Debug, Clone)]
pub struct Network<P = PriceController> {
    topology: Topology,
    processor: SettlementProcessor<P>,
}

impl<P: PricingPolicy> Network<P> {
    pub fn new(topology: Topology, processor: SettlementProcessor<P>) -> Self {
        Self {
            topology,
            processor,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn topology_mut(&mut self) -> &mut Topology {
        &mut self.topology
    }

    pub fn into_topology(self) -> Topology {
        self.topology
    }

    /// Create a message at the request's start node, route it with
    /// `router`, and settle the result.
    ///
    /// A missing path and a malformed path are outcomes, not errors. Unknown
    /// node ids fail the send.
    pub fn send(
        &mut self,
        router: &dyn Router,
        request: &SendRequest,
        observer: &mut dyn SearchObserver,
    ) -> Result<SendOutcome, SimError> {
        // Resolve the destination before the origin's `sent` counter moves.
        self.topology.index_of(&request.end)?;
        let message = self.topology.get_mut(&request.start)?.create_message(
            request.end.clone(),
            request.size,
            request.content.clone(),
        );
        self.deliver(router, &message, observer)
    }

    /// Route and settle an already-created message.
    pub fn deliver(
        &mut self,
        router: &dyn Router,
        message: &Message,
        observer: &mut dyn SearchObserver,
    ) -> Result<SendOutcome, SimError> {
        let path = match router.route(&mut self.topology, message, observer)? {
            RouteResult::Found(path) => path,
            RouteResult::NotFound => return Ok(SendOutcome::NotFound),
        };
        let path_len = path.len();

        match self.processor.settle(&mut self.topology, message, path) {
            Ok(receipt) => Ok(SendOutcome::Delivered { path_len, receipt }),
            Err(SettlementError::MalformedPath { .. }) => {
                Ok(SendOutcome::SettlementFailed { path_len })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Runs a scenario's batch once per selected algorithm.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: ScenarioConfig,
}

impl Simulation {
    pub fn new(config: ScenarioConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    fn fresh_network(&self) -> Result<Network, SimError> {
        Ok(Network::new(
            self.config.topology()?,
            SettlementProcessor::new(PriceController::new(self.config.pricing.clone())),
        ))
    }

    pub fn run(&self) -> Result<BatchReport, SimError> {
        let started_at = Utc::now();
        let run_id = Uuid::now_v7();
        let mode = self.config.simulation.mode;
        tracing::info!(
            %run_id,
            ?mode,
            requests = self.config.sends.len(),
            algorithms = self.config.simulation.algorithms.len(),
            "starting batch"
        );

        let mut collector = MetricsCollector::new();
        let networks = match mode {
            ComparisonMode::Isolated => self.run_isolated(&mut collector)?,
            ComparisonMode::Interleaved => self.run_interleaved(&mut collector)?,
        };

        let finished_at = Utc::now();
        tracing::info!(%run_id, "batch complete");
        Ok(BatchReport {
            run_id,
            mode,
            started_at,
            finished_at,
            requests: self.config.sends.len(),
            metrics: collector.into_results(),
            networks,
        })
    }

    /// Each algorithm gets its own copy of the initial network.
    fn run_isolated(&self, collector: &mut MetricsCollector) -> Result<Vec<NetworkSnapshot>, SimError> {
        let strong = self.config.simulation.strong_balance;
        let mut snapshots = Vec::new();

        for &kind in &self.config.simulation.algorithms {
            let mut network = self.fresh_network()?;
            let router = kind.router();
            let batch_start = Instant::now();

            for request in &self.config.sends {
                send_and_record(&mut network, kind, router.as_ref(), request, collector)?;
            }

            let average_price = network.topology().average_price();
            collector.record_batch(kind, batch_start.elapsed(), average_price);
            tracing::info!(algorithm = %kind, average_price, "algorithm batch finished");
            snapshots.push(NetworkSnapshot::capture(kind.as_str(), network.topology(), strong));
        }
        Ok(snapshots)
    }

    /// One shared network; every request is sent once per algorithm before
    /// moving on.
    fn run_interleaved(
        &self,
        collector: &mut MetricsCollector,
    ) -> Result<Vec<NetworkSnapshot>, SimError> {
        let mut network = self.fresh_network()?;
        let mut routers: Vec<(AlgorithmKind, Box<dyn Router>, Duration)> = self
            .config
            .simulation
            .algorithms
            .iter()
            .map(|&kind| (kind, kind.router(), Duration::ZERO))
            .collect();

        for request in &self.config.sends {
            for (kind, router, spent) in routers.iter_mut() {
                let start = Instant::now();
                send_and_record(&mut network, *kind, &**router, request, collector)?;
                *spent += start.elapsed();
            }
        }

        let average_price = network.topology().average_price();
        for (kind, _, spent) in &routers {
            collector.record_batch(*kind, *spent, average_price);
        }
        Ok(vec![NetworkSnapshot::capture(
            "shared",
            network.topology(),
            self.config.simulation.strong_balance,
        )])
    }
}

fn send_and_record(
    network: &mut Network,
    kind: AlgorithmKind,
    router: &dyn Router,
    request: &SendRequest,
    collector: &mut MetricsCollector,
) -> Result<SendOutcome, SimError> {
    let mut tracker = collector.begin_send();
    let outcome = network.send(router, request, &mut tracker)?;
    if matches!(outcome, SendOutcome::SettlementFailed { .. }) {
        collector.record_settlement_failure(kind);
    }
    collector.end_send(kind, tracker, outcome.path_len());
    Ok(outcome)
}
