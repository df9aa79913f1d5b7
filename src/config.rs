use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::live::activation::{default_activations, validate_activations, ActivationSchedule, FeatureActivation};
use crate::model::compression::{
    CompressionEstimator, SimulatedDelay, DEFAULT_COMPRESSION_COST_CAP, DEFAULT_COMPRESSION_COST_PER_MB,
    DEFAULT_COMPRESSION_RATIO,
};
use crate::simulation::{reference_scenarios, Scenario, DEFAULT_AVERAGE_TRANSACTION_SIZE};
use crate::utils::size::{serde_size, BYTES_PER_MB};

/// Block size of the competing chain used for the comparison section
pub const DEFAULT_COMPARISON_BYTES: u64 = 4096 * BYTES_PER_MB;

/// Complete harness configuration.
///
/// Every key is optional; an empty file yields the reference scenario suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base seed for transaction generation; random (and logged) when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Modeled average transaction size in bytes
    pub average_transaction_size: u64,
    /// Modeled compressed/raw ratio, in (0, 1]
    pub compression_ratio: f64,
    /// Simulated compression work per megabyte
    #[serde(with = "humantime_serde")]
    pub compression_cost_per_mb: Duration,
    /// Upper bound on simulated compression work per scenario
    #[serde(with = "humantime_serde")]
    pub compression_cost_cap: Duration,
    /// Pause between consecutive scenarios
    #[serde(with = "humantime_serde")]
    pub pause_between_scenarios: Duration,
    pub comparison: ComparisonConfig,
    pub scenarios: Vec<Scenario>,
    pub activation: Vec<FeatureActivation>,
}

/// Competitor comparison settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Name of the competing chain in reports
    pub competitor: String,
    /// First scenario whose target meets this size is compared
    #[serde(with = "serde_size")]
    pub threshold: u64,
    /// Bytes the competitor transmits for the same block (no compression)
    #[serde(with = "serde_size")]
    pub baseline: u64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            competitor: "Bitcoin SV".to_string(),
            threshold: DEFAULT_COMPARISON_BYTES,
            baseline: DEFAULT_COMPARISON_BYTES,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            average_transaction_size: DEFAULT_AVERAGE_TRANSACTION_SIZE,
            compression_ratio: DEFAULT_COMPRESSION_RATIO,
            compression_cost_per_mb: DEFAULT_COMPRESSION_COST_PER_MB,
            compression_cost_cap: DEFAULT_COMPRESSION_COST_CAP,
            pause_between_scenarios: Duration::from_secs(1),
            comparison: ComparisonConfig::default(),
            scenarios: reference_scenarios(),
            activation: default_activations(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.average_transaction_size == 0 {
            return Err(ValidationError::InvalidModel(
                "average_transaction_size must be positive".to_string(),
            ));
        }

        if !(self.compression_ratio > 0.0 && self.compression_ratio <= 1.0) {
            return Err(ValidationError::InvalidModel(format!(
                "compression_ratio must be in (0, 1], got {}",
                self.compression_ratio
            )));
        }

        if self.scenarios.is_empty() {
            return Err(ValidationError::InvalidScenario(
                "at least one scenario is required".to_string(),
            ));
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            if scenario.name.trim().is_empty() {
                return Err(ValidationError::InvalidScenario(format!(
                    "scenario {} has an empty name",
                    i
                )));
            }
        }

        if self.comparison.baseline == 0 {
            return Err(ValidationError::InvalidComparison(
                "baseline must be positive".to_string(),
            ));
        }

        validate_activations(&self.activation).map_err(ValidationError::InvalidActivation)?;

        Ok(())
    }

    pub fn estimator(&self) -> CompressionEstimator {
        CompressionEstimator::new(self.compression_ratio)
    }

    pub fn compression_delay(&self) -> SimulatedDelay {
        SimulatedDelay {
            per_megabyte: self.compression_cost_per_mb,
            cap: self.compression_cost_cap,
        }
    }

    pub fn activation_schedule(&self) -> ActivationSchedule {
        ActivationSchedule::new(self.activation.clone())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid model configuration: {0}")]
    InvalidModel(String),
    #[error("Invalid scenario configuration: {0}")]
    InvalidScenario(String),
    #[error("Invalid comparison configuration: {0}")]
    InvalidComparison(String),
    #[error("Invalid activation schedule: {0}")]
    InvalidActivation(String),
}
