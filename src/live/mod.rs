//! Optional live node data.
//!
//! The harness never talks to a node directly. It reads chain height and
//! mempool capacity through [`LiveChainSource`] (a monitor snapshot on disk,
//! or a fixed double in tests) and annotates the report with which modeled
//! features the chain has activated.

pub mod activation;
pub mod annotation;
pub mod snapshot;
pub mod types;

pub use activation::{ActivationSchedule, FeatureActivation, FeatureStatus};
pub use annotation::{collect_live_annotation, LiveAnnotation, MempoolCapacity};
pub use snapshot::SnapshotFile;
pub use types::{ChainInfo, LiveChainSource, LiveError, LiveReading, MempoolInfo};
