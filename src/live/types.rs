//! Live node data shapes and the source capability.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Subset of a node's chain info response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Current chain height
    pub blocks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initialblockdownload: Option<bool>,
}

/// Subset of a node's mempool info response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MempoolInfo {
    /// Mempool capacity in bytes
    pub maxmempool: u64,
    /// Transactions currently held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Bytes currently held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// Errors reading live node data
#[derive(Debug, thiserror::Error)]
pub enum LiveError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed live data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("live data has no {0} section")]
    Missing(&'static str),
}

/// Chain and mempool state taken from one read of a source
#[derive(Debug)]
pub struct LiveReading {
    pub chain: Result<ChainInfo, LiveError>,
    pub mempool: Result<MempoolInfo, LiveError>,
}

/// Read-only access to a node's chain and mempool state
pub trait LiveChainSource {
    fn chain_info(&self) -> Result<ChainInfo, LiveError>;
    fn mempool_info(&self) -> Result<MempoolInfo, LiveError>;

    /// Both sections at once. Sources backed by a single document override
    /// this so the two sections describe the same moment.
    fn read(&self) -> LiveReading {
        LiveReading {
            chain: self.chain_info(),
            mempool: self.mempool_info(),
        }
    }
}
