//! Live data captured to disk by the node monitor.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::types::{ChainInfo, LiveChainSource, LiveError, LiveReading, MempoolInfo};

/// Top-level shape of a snapshot file.
///
/// Sections the monitor could not fetch are written as `{}`; both missing and
/// empty sections are reported as [`LiveError::Missing`].
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default, alias = "blockchain_status")]
    chain: Option<Value>,
    #[serde(default, alias = "mempool_info", alias = "revolutionary_mempool")]
    mempool: Option<Value>,
}

/// JSON snapshot with `chain` and `mempool` sections
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Snapshot, LiveError> {
        let content = fs::read_to_string(&self.path).map_err(|source| LiveError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn section<T: DeserializeOwned>(
    value: Option<Value>,
    name: &'static str,
) -> Result<T, LiveError> {
    match value {
        None | Some(Value::Null) => Err(LiveError::Missing(name)),
        Some(Value::Object(map)) if map.is_empty() => Err(LiveError::Missing(name)),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

impl LiveChainSource for SnapshotFile {
    fn chain_info(&self) -> Result<ChainInfo, LiveError> {
        section(self.load()?.chain, "chain")
    }

    fn mempool_info(&self) -> Result<MempoolInfo, LiveError> {
        section(self.load()?.mempool, "mempool")
    }

    fn read(&self) -> LiveReading {
        match self.load() {
            Ok(snapshot) => LiveReading {
                chain: section(snapshot.chain, "chain"),
                mempool: section(snapshot.mempool, "mempool"),
            },
            Err(e) => LiveReading {
                chain: Err(e),
                mempool: Err(LiveError::Missing("mempool")),
            },
        }
    }
}
