//! Shared utilities: size parsing and unit conversion.

pub mod size;

pub use size::{bytes_to_mb, parse_size_to_bytes, BYTES_PER_MB};
