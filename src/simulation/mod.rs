//! Scenario execution.
//!
//! A scenario generates a synthetic block, applies canonical ordering and runs
//! the compression model over it. Scenarios run sequentially and can be
//! interrupted through a shared [`CancellationToken`].

pub mod cancel;
pub mod result;
pub mod runner;
pub mod scenario;

pub use cancel::CancellationToken;
pub use result::ScenarioResult;
pub use runner::{ScenarioError, ScenarioRunner, DEFAULT_AVERAGE_TRANSACTION_SIZE};
pub use scenario::{reference_scenarios, Scenario};
