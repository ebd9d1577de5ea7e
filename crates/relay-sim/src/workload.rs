use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relay_core::NodeId;

use crate::config::SendRequest;
use crate::error::SimError;

/// Parameters for a random batch of sends.
#[derive(Debug, Clone)]
pub struct WorkloadSpec {
    pub count: usize,
    /// Largest payload size; sizes are drawn from `1..=max_size`.
    pub max_size: u64,
    pub seed: Option<u64>,
}

/// Draw `spec.count` requests between distinct random nodes of `ids`.
///
/// The same seed over the same ids always yields the same batch.
pub fn generate(ids: &[NodeId], spec: &WorkloadSpec) -> Result<Vec<SendRequest>, SimError> {
    if ids.len() < 2 {
        return Err(SimError::InvalidScenario(format!(
            "need at least two nodes to generate traffic, have {}",
            ids.len()
        )));
    }
    if spec.max_size == 0 {
        return Err(SimError::InvalidScenario("max_size must be at least 1".into()));
    }

    let mut rng = match spec.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let requests = (0..spec.count)
        .map(|i| {
            let start = rng.gen_range(0..ids.len());
            // Shift past `start` so start and end always differ.
            let mut end = rng.gen_range(0..ids.len() - 1);
            if end >= start {
                end += 1;
            }
            SendRequest {
                start: ids[start].clone(),
                end: ids[end].clone(),
                size: rng.gen_range(1..=spec.max_size),
                content: format!("message {}", i + 1),
            }
        })
        .collect();
    Ok(requests)
}
