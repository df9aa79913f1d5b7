//! Scenario definitions.

use serde::{Deserialize, Serialize};

use crate::utils::size::{serde_size, BYTES_PER_MB};

/// One parameterized simulation run targeting a block size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Requested block size in bytes; accepts "100MB"-style strings in config
    #[serde(rename = "target", with = "serde_size")]
    pub target_size_bytes: u64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, target_size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            target_size_bytes,
        }
    }

    /// Scenario targeting `megabytes` binary megabytes
    pub fn with_megabytes(name: impl Into<String>, megabytes: u64) -> Self {
        Self::new(name, megabytes * BYTES_PER_MB)
    }
}

/// Progressive scaling suite from a 100 MB baseline up to a 4 GB block
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::with_megabytes("100MB Block Test - Baseline", 100),
        Scenario::with_megabytes("500MB Block Test - Medium Scale", 500),
        Scenario::with_megabytes("1GB Block Test - Large Scale", 1024),
        Scenario::with_megabytes("2GB Block Test - Very Large Scale", 2048),
        Scenario::with_megabytes("4GB Block Test - Competitor Matching", 4096),
    ]
}
