//! # BlockSim - Large-block simulation and bandwidth reporting harness
//!
//! This library models how a chain with canonical transaction ordering and
//! compressed block relay behaves as blocks grow from hundreds of megabytes
//! to several gigabytes.
//!
//! ## Overview
//!
//! Each scenario synthesizes a block of realistic transactions, sorts it into
//! canonical order and runs a closed-form compression model over it. A suite
//! of scenarios is folded into a report comparing transmitted sizes against a
//! competitor that relays blocks uncompressed.
//!
//! Nothing here validates consensus, encodes blocks or touches the network:
//! every effect is modeled.
//!
//! ## Architecture
//!
//! - `model`: transaction generator, canonical orderer, compression estimator
//! - `simulation`: scenario definitions, runner and cancellation
//! - `analysis`: suite aggregation and JSON/text reporting
//! - `live`: optional live-chain annotations from a node monitor snapshot
//! - `config` / `config_loader`: YAML configuration with validated defaults
//! - `utils`: size parsing and unit conversion
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use blocksim::analysis::{print_summary, ReportAggregator};
//! use blocksim::config::Config;
//! use blocksim::simulation::CancellationToken;
//!
//! let config = Config::default();
//! let aggregator = ReportAggregator::from_config(&config, 42, CancellationToken::new());
//! let report = aggregator.run_all(&config.scenarios);
//! print_summary(&report);
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! seed: 42
//! compression_ratio: 0.1
//! compression_cost_cap: 2s
//! scenarios:
//!   - name: "100MB Block Test - Baseline"
//!     target: 100MB
//!   - name: "4GB Block Test"
//!     target: 4GB
//! ```
//!
//! ## Error Handling
//!
//! I/O-facing functions return `color_eyre::Result`. Classified failures
//! (configuration, scenario, live data) are `thiserror` enums.

pub mod config;
pub mod config_loader;

pub mod model;
pub mod simulation;
pub mod analysis;
pub mod live;
pub mod utils;
