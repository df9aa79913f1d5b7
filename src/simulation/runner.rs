//! Runs one scenario: generation, canonical ordering, compression estimate.

use std::collections::TryReserveError;
use std::time::Instant;

use log::{debug, info, log_enabled, Level};
use rand::Rng;

use super::cancel::CancellationToken;
use super::result::ScenarioResult;
use super::scenario::Scenario;
use crate::model::{
    CanonicalOrderer, CompressionCostModel, CompressionEstimator, SimulatedDelay, Transaction,
    TransactionModel,
};
use crate::utils::size::bytes_to_mb;

/// Modeled average transaction size used to derive transaction counts
pub const DEFAULT_AVERAGE_TRANSACTION_SIZE: u64 = 250;

/// How often (in transactions) generation checks for cancellation
pub const CANCEL_CHECK_INTERVAL: u64 = 10_000;

/// How often (in transactions) generation logs progress
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Reasons a scenario produced no result
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("scenario cancelled after generating {generated} of {requested} transactions")]
    Cancelled { generated: u64, requested: u64 },
    #[error("cannot allocate {count} transactions: {source}")]
    Allocation {
        count: u64,
        #[source]
        source: TryReserveError,
    },
    #[error("{count} transactions exceed the addressable population size")]
    TooLarge { count: u64 },
}

impl ScenarioError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ScenarioError::Cancelled { .. })
    }
}

/// Executes scenarios one at a time
pub struct ScenarioRunner {
    average_transaction_size: u64,
    orderer: CanonicalOrderer,
    estimator: CompressionEstimator,
    cost_model: Box<dyn CompressionCostModel>,
    cancel: CancellationToken,
}

impl ScenarioRunner {
    /// Runner with default model constants and a size-proportional compression delay
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            average_transaction_size: DEFAULT_AVERAGE_TRANSACTION_SIZE,
            orderer: CanonicalOrderer,
            estimator: CompressionEstimator::default(),
            cost_model: Box::new(SimulatedDelay::default()),
            cancel,
        }
    }

    pub fn with_average_transaction_size(mut self, bytes: u64) -> Self {
        self.average_transaction_size = bytes;
        self
    }

    pub fn with_estimator(mut self, estimator: CompressionEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn with_cost_model(mut self, cost_model: impl CompressionCostModel + 'static) -> Self {
        self.cost_model = Box::new(cost_model);
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Number of transactions needed to approximate `target_size_bytes`
    pub fn transaction_count(&self, target_size_bytes: u64) -> u64 {
        target_size_bytes
            .checked_div(self.average_transaction_size)
            .unwrap_or(0)
    }

    /// Run `scenario` with a generator seeded from `seed`
    pub fn run(&self, scenario: &Scenario, seed: u64) -> Result<ScenarioResult, ScenarioError> {
        self.run_with_model(scenario, &mut TransactionModel::seeded(seed))
    }

    /// Run `scenario` drawing transactions from `model`
    pub fn run_with_model<R: Rng>(
        &self,
        scenario: &Scenario,
        model: &mut TransactionModel<R>,
    ) -> Result<ScenarioResult, ScenarioError> {
        info!(
            "Running scenario '{}' (target {:.1} MB)",
            scenario.name,
            bytes_to_mb(scenario.target_size_bytes)
        );

        let transaction_count = self.transaction_count(scenario.target_size_bytes);
        info!("Generating {} transactions...", transaction_count);

        // Step 1: generate
        let generation_start = Instant::now();
        let (transactions, actual_size_bytes) = self.generate(model, transaction_count)?;
        let generation_duration = generation_start.elapsed();
        info!(
            "Generated {} transactions in {:.3}s ({:.1} MB)",
            transactions.len(),
            generation_duration.as_secs_f64(),
            bytes_to_mb(actual_size_bytes)
        );

        // Step 2: canonical ordering
        let ordering_start = Instant::now();
        let ordered = self.orderer.order(transactions);
        let ordering_duration = ordering_start.elapsed();
        info!("CTOR ordering completed in {:.3}s", ordering_duration.as_secs_f64());

        if log_enabled!(Level::Debug) {
            match self.orderer.first_violation(&ordered) {
                None => debug!("Verified canonical order of {} transactions", ordered.len()),
                Some(index) => debug!("Canonical order violated at index {}", index),
            }
        }
        drop(ordered);

        // Step 3: compression model
        let compression_start = Instant::now();
        let estimate = self.estimator.estimate(actual_size_bytes);
        self.cost_model.simulate(actual_size_bytes);
        let compression_duration = compression_start.elapsed();
        info!(
            "Compression: {:.1} MB -> {:.1} MB (ratio {:.1}%) in {:.3}s",
            bytes_to_mb(actual_size_bytes),
            bytes_to_mb(estimate.compressed_size_bytes),
            estimate.ratio * 100.0,
            compression_duration.as_secs_f64()
        );

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            target_size_bytes: scenario.target_size_bytes,
            actual_size_bytes,
            transaction_count,
            generation_duration,
            ordering_duration,
            compression_duration,
            compressed_size_bytes: estimate.compressed_size_bytes,
            compression_ratio: estimate.ratio,
            bandwidth_savings_percent: (1.0 - estimate.ratio) * 100.0,
            target_compressed_size_bytes: self
                .estimator
                .estimate(scenario.target_size_bytes)
                .compressed_size_bytes,
        })
    }

    /// Generate `count` transactions, returning them with their summed size
    fn generate<R: Rng>(
        &self,
        model: &mut TransactionModel<R>,
        count: u64,
    ) -> Result<(Vec<Transaction>, u64), ScenarioError> {
        let capacity = usize::try_from(count).map_err(|_| ScenarioError::TooLarge { count })?;
        let mut transactions = Vec::new();
        transactions
            .try_reserve_exact(capacity)
            .map_err(|source| ScenarioError::Allocation { count, source })?;

        let mut total_size = 0u64;
        for id in 0..count {
            if id % CANCEL_CHECK_INTERVAL == 0 && self.cancel.is_cancelled() {
                return Err(ScenarioError::Cancelled {
                    generated: id,
                    requested: count,
                });
            }

            let tx = model.generate(id);
            total_size += u64::from(tx.size_bytes);
            transactions.push(tx);

            if id > 0 && id % PROGRESS_INTERVAL == 0 {
                info!("Generated {} transactions...", id);
            }
        }

        Ok((transactions, total_size))
    }
}
