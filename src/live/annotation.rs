//! Live-chain annotation attached to a report.

use log::{info, warn};
use serde::Serialize;

use super::activation::{ActivationSchedule, FeatureStatus};
use super::types::{LiveChainSource, MempoolInfo};

/// Mempool capacity of a stock node, used as the comparison reference
pub const REFERENCE_MEMPOOL_BYTES: u64 = 300 * 1024 * 1024;

const BYTES_PER_TB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;

/// Mempool capacity compared against [`REFERENCE_MEMPOOL_BYTES`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MempoolCapacity {
    pub max_bytes: u64,
    pub max_tb: f64,
    /// How many reference mempools fit in this one
    pub reference_multiple: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_bytes: Option<u64>,
}

impl From<&MempoolInfo> for MempoolCapacity {
    fn from(info: &MempoolInfo) -> Self {
        Self {
            max_bytes: info.maxmempool,
            max_tb: info.maxmempool as f64 / BYTES_PER_TB,
            reference_multiple: info.maxmempool as f64 / REFERENCE_MEMPOOL_BYTES as f64,
            usage_bytes: info.bytes,
        }
    }
}

/// Which modeled features a live chain has activated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveAnnotation {
    pub height: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    pub features: Vec<FeatureStatus>,
    pub active_features: usize,
    pub theoretical_tps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mempool: Option<MempoolCapacity>,
}

/// Query `source` and annotate against `schedule`.
///
/// Returns `None` when chain info is unavailable; a missing mempool section
/// only drops the capacity figures. Failures are logged, never propagated.
pub fn collect_live_annotation(
    source: &dyn LiveChainSource,
    schedule: &ActivationSchedule,
) -> Option<LiveAnnotation> {
    let reading = source.read();
    let chain = match reading.chain {
        Ok(chain) => chain,
        Err(e) => {
            warn!("Live chain data unavailable, skipping annotations: {}", e);
            return None;
        }
    };

    let mempool = match reading.mempool {
        Ok(mempool) => Some(MempoolCapacity::from(&mempool)),
        Err(e) => {
            warn!("Live mempool data unavailable: {}", e);
            None
        }
    };

    let height = chain.blocks;
    info!(
        "Live chain at height {} ({}/{} features active)",
        height,
        schedule.active_count(height),
        schedule.activations().len()
    );

    Some(LiveAnnotation {
        height,
        chain: chain.chain,
        features: schedule.statuses(height),
        active_features: schedule.active_count(height),
        theoretical_tps: schedule.theoretical_tps(height),
        mempool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::types::{ChainInfo, LiveError, LiveReading};

    struct FixedSource {
        blocks: Option<u64>,
        maxmempool: Option<u64>,
    }

    impl LiveChainSource for FixedSource {
        fn chain_info(&self) -> Result<ChainInfo, LiveError> {
            self.blocks
                .map(|blocks| ChainInfo {
                    blocks,
                    chain: Some("regtest".to_string()),
                    initialblockdownload: Some(false),
                })
                .ok_or(LiveError::Missing("chain"))
        }

        fn mempool_info(&self) -> Result<MempoolInfo, LiveError> {
            self.maxmempool
                .map(|maxmempool| MempoolInfo {
                    maxmempool,
                    size: None,
                    bytes: Some(0),
                })
                .ok_or(LiveError::Missing("mempool"))
        }
    }

    #[test]
    fn test_annotation_at_height() {
        let source = FixedSource {
            blocks: Some(2000),
            maxmempool: Some(REFERENCE_MEMPOOL_BYTES * 1000),
        };
        let annotation = collect_live_annotation(&source, &ActivationSchedule::default()).unwrap();

        assert_eq!(annotation.height, 2000);
        assert_eq!(annotation.chain.as_deref(), Some("regtest"));
        assert_eq!(annotation.active_features, 2);
        assert!((annotation.theoretical_tps - 7.0 * 3.0 * 15.8).abs() < 1e-9);

        let mempool = annotation.mempool.unwrap();
        assert_eq!(mempool.reference_multiple, 1000.0);
        assert_eq!(mempool.usage_bytes, Some(0));
    }

    #[test]
    fn test_mempool_capacity_in_terabytes() {
        let capacity = MempoolCapacity::from(&MempoolInfo {
            maxmempool: 300 * 1024 * 1024 * 1024 * 1024,
            size: None,
            bytes: None,
        });
        assert_eq!(capacity.max_tb, 300.0);
    }

    /// Serves everything through a single `read`, counting calls
    struct SingleReadSource {
        reads: std::cell::Cell<usize>,
    }

    impl LiveChainSource for SingleReadSource {
        fn chain_info(&self) -> Result<ChainInfo, LiveError> {
            Err(LiveError::Missing("chain"))
        }

        fn mempool_info(&self) -> Result<MempoolInfo, LiveError> {
            Err(LiveError::Missing("mempool"))
        }

        fn read(&self) -> LiveReading {
            self.reads.set(self.reads.get() + 1);
            LiveReading {
                chain: Ok(ChainInfo {
                    blocks: 3000,
                    chain: None,
                    initialblockdownload: None,
                }),
                mempool: Ok(MempoolInfo {
                    maxmempool: REFERENCE_MEMPOOL_BYTES,
                    size: None,
                    bytes: None,
                }),
            }
        }
    }

    #[test]
    fn test_annotation_reads_source_once() {
        let source = SingleReadSource {
            reads: std::cell::Cell::new(0),
        };
        let annotation = collect_live_annotation(&source, &ActivationSchedule::default()).unwrap();

        assert_eq!(source.reads.get(), 1);
        assert_eq!(annotation.active_features, 3);
        assert_eq!(annotation.mempool.unwrap().reference_multiple, 1.0);
    }

    #[test]
    fn test_missing_chain_yields_no_annotation() {
        let source = FixedSource {
            blocks: None,
            maxmempool: Some(1),
        };
        assert!(collect_live_annotation(&source, &ActivationSchedule::default()).is_none());
    }

    #[test]
    fn test_missing_mempool_keeps_features() {
        let source = FixedSource {
            blocks: Some(500),
            maxmempool: None,
        };
        let annotation = collect_live_annotation(&source, &ActivationSchedule::default()).unwrap();
        assert_eq!(annotation.active_features, 0);
        assert!(annotation.mempool.is_none());
    }
}
