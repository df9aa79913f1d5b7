//! Size parsing utilities.
//!
//! This module provides utilities for parsing size strings
//! (e.g., "4GB", "100MB") into byte counts. Units are binary:
//! 1 KB = 1024 bytes, 1 MB = 1024 KB, 1 GB = 1024 MB.

/// Bytes in one megabyte (binary)
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Parse size string (e.g., "4GB", "100MB", "512KB") to bytes
///
/// Supports various size formats:
/// - Raw bytes: "1048576"
/// - Bytes: "1024B", "1024bytes"
/// - Kilobytes: "64KB", "64K", "64KiB"
/// - Megabytes: "100MB", "100M", "100MiB"
/// - Gigabytes: "4GB", "4G", "4GiB"
///
/// Suffixes are case-insensitive.
///
/// # Examples
/// ```
/// use blocksim::utils::size::parse_size_to_bytes;
///
/// assert_eq!(parse_size_to_bytes("1048576"), Ok(1048576));
/// assert_eq!(parse_size_to_bytes("100MB"), Ok(104857600));
/// assert_eq!(parse_size_to_bytes("4GB"), Ok(4294967296));
/// assert!(parse_size_to_bytes("invalid").is_err());
/// ```
pub fn parse_size_to_bytes(size: &str) -> Result<u64, String> {
    let size = size.trim();
    let lower = size.to_ascii_lowercase();

    // Check longer suffixes before shorter ones
    let units: [(&[&str], u64); 4] = [
        (&["gib", "gb", "g"], 1024 * BYTES_PER_MB),
        (&["mib", "mb", "m"], BYTES_PER_MB),
        (&["kib", "kb", "k"], 1024),
        (&["bytes", "b"], 1),
    ];

    for (suffixes, multiplier) in units {
        if suffixes.iter().any(|s| lower.ends_with(s)) {
            let num_str = extract_number_part(&lower);
            if num_str.is_empty() || num_str.len() + suffix_len(&lower, suffixes) != lower.len() {
                break;
            }
            return num_str
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_mul(multiplier))
                .ok_or_else(|| format!("Invalid size format: {}", size));
        }
    }

    // Only try raw bytes parsing if no unit suffix is found
    if let Ok(bytes) = lower.parse::<u64>() {
        return Ok(bytes);
    }

    Err(format!("Invalid size format: {}", size))
}

/// Convert a byte count to (binary) megabytes
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB as f64
}

/// Extract the numeric part from a size string by finding the first non-digit character
fn extract_number_part(size: &str) -> &str {
    match size.find(|c: char| !c.is_ascii_digit()) {
        Some(i) => &size[..i],
        None => size,
    }
}

/// Length of the longest suffix in `suffixes` that `size` ends with
fn suffix_len(size: &str, suffixes: &[&str]) -> usize {
    suffixes
        .iter()
        .filter(|s| size.ends_with(*s))
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
}

/// Serde adapter for byte counts written either as integers or as size strings.
///
/// Serializes as a plain integer so round-tripped configs stay unambiguous.
pub mod serde_size {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SizeRepr {
        Bytes(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(bytes: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match SizeRepr::deserialize(deserializer)? {
            SizeRepr::Bytes(bytes) => Ok(bytes),
            SizeRepr::Text(text) => super::parse_size_to_bytes(&text).map_err(serde::de::Error::custom),
        }
    }
}
