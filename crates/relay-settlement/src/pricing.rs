use relay_core::{Node, PricingConfig};
use serde::{Deserialize, Serialize};

/// What a controller did to a node's price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceAdjustment {
    /// Not enough exposure yet, or the relay rate sat inside the band.
    Unchanged,
    Decreased { from: f64, to: f64 },
    Increased { from: f64, to: f64 },
}

impl PriceAdjustment {
    pub fn is_change(&self) -> bool {
        !matches!(self, PriceAdjustment::Unchanged)
    }
}

/// Pricing policy consulted after each settlement event touching a node.
pub trait PricingPolicy {
    fn adjust(&self, node: &mut Node) -> PriceAdjustment;
}

/// Episodic hysteresis controller.
///
/// Once a node's exposure exceeds `min_samples`, the relay rate
/// `transmitted / seen` is compared against the band
/// `[decrease_threshold, increase_threshold]`. Below the band the price
/// drops by `decrease_step` (never under `price_floor`); above it the price
/// rises by `increase_step`. Every adjustment resets both counters, so each
/// decision only reflects the episode since the last one.
#[derive(Debug, Clone, Default)]
pub struct PriceController {
    config: PricingConfig,
}

impl PriceController {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

impl PricingPolicy for PriceController {
    fn adjust(&self, node: &mut Node) -> PriceAdjustment {
        let cfg = &self.config;
        if node.counters.seen <= cfg.min_samples {
            return PriceAdjustment::Unchanged;
        }
        let Some(rate) = node.transmission_rate() else {
            return PriceAdjustment::Unchanged;
        };

        let from = node.price_per_byte;
        let adjustment = if from > cfg.price_floor && rate < cfg.decrease_threshold {
            let to = (from - cfg.decrease_step).max(cfg.price_floor);
            PriceAdjustment::Decreased { from, to }
        } else if rate > cfg.increase_threshold {
            PriceAdjustment::Increased {
                from,
                to: from + cfg.increase_step,
            }
        } else {
            return PriceAdjustment::Unchanged;
        };

        if let PriceAdjustment::Decreased { to, .. } | PriceAdjustment::Increased { to, .. } =
            adjustment
        {
            tracing::info!(
                node = %node.id,
                from = format_args!("{:.2}", from),
                to = format_args!("{:.2}", to),
                rate,
                "adjusting price"
            );
            node.price_per_byte = to;
            node.reset_episode();
        }
        adjustment
    }
}
