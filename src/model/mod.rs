//! Closed-form models of block contents, ordering and relay compression.

pub mod transaction;
pub mod ordering;
pub mod compression;

pub use transaction::{Fingerprint, Transaction, TransactionModel};
pub use ordering::CanonicalOrderer;
pub use compression::{
    CompressionCostModel, CompressionEstimate, CompressionEstimator, NoDelay, SimulatedDelay,
};
