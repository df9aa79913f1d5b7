//! Block compression model.
//!
//! This is a closed-form bandwidth model, NOT a codec. Nothing is encoded or
//! decoded: the transmitted size of a block is estimated as a fixed fraction
//! of its raw size, matching the ~90% reduction claimed for thin-block relay.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::utils::size::bytes_to_mb;

/// Modeled compressed/raw ratio (90% bandwidth reduction)
pub const DEFAULT_COMPRESSION_RATIO: f64 = 0.10;

/// Simulated compression work per megabyte of raw block data
pub const DEFAULT_COMPRESSION_COST_PER_MB: Duration = Duration::from_millis(100);

/// Upper bound on simulated compression work for any single block
pub const DEFAULT_COMPRESSION_COST_CAP: Duration = Duration::from_secs(2);

/// Output of the compression model for one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionEstimate {
    pub compressed_size_bytes: u64,
    /// compressed / raw, or 0.0 for an empty block
    pub ratio: f64,
}

/// Estimates transmitted block size from raw size
#[derive(Debug, Clone, Copy)]
pub struct CompressionEstimator {
    ratio: f64,
}

impl Default for CompressionEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPRESSION_RATIO)
    }
}

impl CompressionEstimator {
    /// `ratio` must lie in (0, 1]; config validation enforces this
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Estimate the compressed size of a block of `raw_size_bytes`
    pub fn estimate(&self, raw_size_bytes: u64) -> CompressionEstimate {
        if raw_size_bytes == 0 {
            return CompressionEstimate {
                compressed_size_bytes: 0,
                ratio: 0.0,
            };
        }

        let compressed_size_bytes = (raw_size_bytes as f64 * self.ratio).floor() as u64;
        CompressionEstimate {
            compressed_size_bytes,
            ratio: compressed_size_bytes as f64 / raw_size_bytes as f64,
        }
    }
}

/// Cost of compressing a block, as seen by the scenario timer.
///
/// Implementations may block to simulate work; they return the simulated
/// duration.
pub trait CompressionCostModel {
    fn simulate(&self, raw_size_bytes: u64) -> Duration;
}

/// Sleeps proportionally to block size, capped at `cap`
#[derive(Debug, Clone, Copy)]
pub struct SimulatedDelay {
    pub per_megabyte: Duration,
    pub cap: Duration,
}

impl Default for SimulatedDelay {
    fn default() -> Self {
        Self {
            per_megabyte: DEFAULT_COMPRESSION_COST_PER_MB,
            cap: DEFAULT_COMPRESSION_COST_CAP,
        }
    }
}

impl SimulatedDelay {
    /// Delay this model applies to a block of `raw_size_bytes`
    pub fn delay_for(&self, raw_size_bytes: u64) -> Duration {
        let uncapped = self.per_megabyte.mul_f64(bytes_to_mb(raw_size_bytes));
        uncapped.min(self.cap)
    }
}

impl CompressionCostModel for SimulatedDelay {
    fn simulate(&self, raw_size_bytes: u64) -> Duration {
        let delay = self.delay_for(raw_size_bytes);
        debug!(
            "Simulating {:.3}s of compression work for {:.1} MB",
            delay.as_secs_f64(),
            bytes_to_mb(raw_size_bytes)
        );
        thread::sleep(delay);
        delay
    }
}

/// Zero-cost model for tests and fast runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl CompressionCostModel for NoDelay {
    fn simulate(&self, _raw_size_bytes: u64) -> Duration {
        Duration::ZERO
    }
}
