use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Tuning for the per-node price controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Exposure (`seen`) must exceed this before the controller acts.
    #[serde(default = "default_min_samples")]
    pub min_samples: u64,
    /// Relay rates strictly below this lower the price.
    #[serde(default = "default_decrease_threshold")]
    pub decrease_threshold: f64,
    /// Relay rates strictly above this raise the price.
    #[serde(default = "default_increase_threshold")]
    pub increase_threshold: f64,
    /// Amount removed per decrease.
    #[serde(default = "default_decrease_step")]
    pub decrease_step: f64,
    /// Amount added per increase.
    #[serde(default = "default_increase_step")]
    pub increase_step: f64,
    /// Price never drops below this.
    #[serde(default = "default_price_floor")]
    pub price_floor: f64,
}

fn default_min_samples() -> u64 {
    2
}
fn default_decrease_threshold() -> f64 {
    0.3
}
fn default_increase_threshold() -> f64 {
    0.7
}
fn default_decrease_step() -> f64 {
    0.1
}
fn default_increase_step() -> f64 {
    0.05
}
fn default_price_floor() -> f64 {
    0.1
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            decrease_threshold: default_decrease_threshold(),
            increase_threshold: default_increase_threshold(),
            decrease_step: default_decrease_step(),
            increase_step: default_increase_step(),
            price_floor: default_price_floor(),
        }
    }
}

impl PricingConfig {
    /// Check the thresholds form a proper hysteresis band and the steps
    /// are usable.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("decrease_threshold", self.decrease_threshold),
            ("increase_threshold", self.increase_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidConfig(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.decrease_threshold >= self.increase_threshold {
            return Err(CoreError::InvalidConfig(format!(
                "decrease_threshold ({}) must be below increase_threshold ({})",
                self.decrease_threshold, self.increase_threshold
            )));
        }
        for (name, value) in [
            ("decrease_step", self.decrease_step),
            ("increase_step", self.increase_step),
            ("price_floor", self.price_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
