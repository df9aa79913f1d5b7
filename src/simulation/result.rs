//! Outcome of a single completed scenario.

use std::time::Duration;

use crate::utils::size::bytes_to_mb;

/// Measurements from one scenario run.
///
/// Only produced for scenarios that ran to completion; the transaction
/// population itself is not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub name: String,
    pub target_size_bytes: u64,
    /// Sum of generated transaction sizes
    pub actual_size_bytes: u64,
    pub transaction_count: u64,
    pub generation_duration: Duration,
    pub ordering_duration: Duration,
    pub compression_duration: Duration,
    pub compressed_size_bytes: u64,
    /// compressed / raw
    pub compression_ratio: f64,
    /// (1 - compression_ratio) * 100
    pub bandwidth_savings_percent: f64,
    /// Compression model applied to the target size, for like-for-like
    /// comparison against a nominal competitor block
    pub target_compressed_size_bytes: u64,
}

impl ScenarioResult {
    pub fn total_duration(&self) -> Duration {
        self.generation_duration + self.ordering_duration + self.compression_duration
    }

    pub fn target_size_mb(&self) -> f64 {
        bytes_to_mb(self.target_size_bytes)
    }

    pub fn actual_size_mb(&self) -> f64 {
        bytes_to_mb(self.actual_size_bytes)
    }

    pub fn compressed_size_mb(&self) -> f64 {
        bytes_to_mb(self.compressed_size_bytes)
    }

    pub fn target_compressed_size_mb(&self) -> f64 {
        bytes_to_mb(self.target_compressed_size_bytes)
    }

    /// Ordering cost per transaction in nanoseconds, `None` for empty blocks
    pub fn ordering_ns_per_transaction(&self) -> Option<f64> {
        if self.transaction_count == 0 {
            return None;
        }
        Some(self.ordering_duration.as_nanos() as f64 / self.transaction_count as f64)
    }
}
