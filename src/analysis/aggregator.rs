//! Sequential execution of a scenario suite.

use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use super::types::{Report, SkippedScenario};
use crate::config::{ComparisonConfig, Config};
use crate::simulation::{CancellationToken, Scenario, ScenarioRunner};
use crate::utils::size::bytes_to_mb;

/// Granularity at which pauses between scenarios notice cancellation
const PAUSE_SLICE: Duration = Duration::from_millis(100);

/// Seed for the scenario at `index` in a run seeded with `base`
pub fn scenario_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Runs scenarios in order and folds their results into a [`Report`]
pub struct ReportAggregator {
    runner: ScenarioRunner,
    seed: u64,
    pause: Duration,
    comparison: ComparisonConfig,
}

impl ReportAggregator {
    pub fn new(runner: ScenarioRunner, seed: u64) -> Self {
        Self {
            runner,
            seed,
            pause: Duration::ZERO,
            comparison: ComparisonConfig::default(),
        }
    }

    /// Aggregator wired with every model setting from `config`
    pub fn from_config(config: &Config, seed: u64, cancel: CancellationToken) -> Self {
        let runner = ScenarioRunner::new(cancel)
            .with_average_transaction_size(config.average_transaction_size)
            .with_estimator(config.estimator())
            .with_cost_model(config.compression_delay());

        Self::new(runner, seed)
            .with_pause(config.pause_between_scenarios)
            .with_comparison(config.comparison.clone())
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonConfig) -> Self {
        self.comparison = comparison;
        self
    }

    fn cancel(&self) -> &CancellationToken {
        self.runner.cancellation()
    }

    /// Execute `scenarios` strictly in order.
    ///
    /// A failed scenario is recorded as skipped and the batch continues.
    /// Cancellation stops the batch; only fully completed scenarios are kept.
    pub fn run_all(&self, scenarios: &[Scenario]) -> Report {
        let mut report = Report::new(self.seed, self.comparison.clone());

        for (index, scenario) in scenarios.iter().enumerate() {
            if self.cancel().is_cancelled() {
                report.interrupted = true;
                break;
            }

            info!("{}", "=".repeat(80));
            info!("Scenario {}/{}: {}", index + 1, scenarios.len(), scenario.name);

            match self.runner.run(scenario, scenario_seed(self.seed, index)) {
                Ok(result) => {
                    report.results.push(result);
                    // Interrupt landed after generation; keep the result but stop here
                    if self.cancel().is_cancelled() {
                        report.interrupted = true;
                        break;
                    }
                }
                Err(e) if e.is_cancelled() => {
                    warn!("Scenario '{}' interrupted: {}", scenario.name, e);
                    report.interrupted = true;
                    break;
                }
                Err(e) => {
                    warn!("Scenario '{}' skipped: {}", scenario.name, e);
                    report.skipped.push(SkippedScenario {
                        test_name: scenario.name.clone(),
                        target_size_mb: bytes_to_mb(scenario.target_size_bytes),
                        reason: e.to_string(),
                    });
                }
            }

            if index + 1 < scenarios.len() {
                self.pause_between_scenarios();
            }
        }

        if report.interrupted {
            info!(
                "Run interrupted after {} of {} scenarios",
                report.results.len(),
                scenarios.len()
            );
        }

        report
    }

    fn pause_between_scenarios(&self) {
        let deadline = Instant::now() + self.pause;
        loop {
            let now = Instant::now();
            if now >= deadline || self.cancel().is_cancelled() {
                return;
            }
            thread::sleep(PAUSE_SLICE.min(deadline - now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CompressionCostModel, NoDelay};

    fn aggregator(cancel: CancellationToken) -> ReportAggregator {
        let runner = ScenarioRunner::new(cancel).with_cost_model(NoDelay);
        ReportAggregator::new(runner, 5)
    }

    fn scenarios() -> Vec<Scenario> {
        vec![
            Scenario::new("first", 50_000),
            Scenario::new("second", 100_000),
            Scenario::new("third", 150_000),
        ]
    }

    #[test]
    fn test_results_keep_execution_order() {
        let report = aggregator(CancellationToken::new()).run_all(&scenarios());
        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert!(!report.interrupted);
        assert!(report.skipped.is_empty());
        assert_eq!(report.seed, 5);
    }

    #[test]
    fn test_cancelled_before_start_yields_empty_report() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = aggregator(cancel).run_all(&scenarios());
        assert!(report.results.is_empty());
        assert!(report.interrupted);
        assert!(report.summary().is_none());
    }

    #[test]
    fn test_failed_scenario_is_skipped_and_batch_continues() {
        let scenarios = vec![
            Scenario::new("before", 50_000),
            Scenario::new("impossible", u64::MAX),
            Scenario::new("after", 50_000),
        ];
        let report = aggregator(CancellationToken::new()).run_all(&scenarios);

        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["before", "after"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].test_name, "impossible");
        assert!(!report.skipped[0].reason.is_empty());
        assert!(!report.interrupted);
    }

    /// Cancels the run once it has been asked to compress `after` blocks
    struct CancelAfter {
        cancel: CancellationToken,
        after: usize,
        seen: std::cell::Cell<usize>,
    }

    impl CompressionCostModel for CancelAfter {
        fn simulate(&self, _raw_size_bytes: u64) -> Duration {
            self.seen.set(self.seen.get() + 1);
            if self.seen.get() >= self.after {
                self.cancel.cancel();
            }
            Duration::ZERO
        }
    }

    #[test]
    fn test_cancel_mid_run_keeps_completed_scenarios() {
        let cancel = CancellationToken::new();
        let runner = ScenarioRunner::new(cancel.clone()).with_cost_model(CancelAfter {
            cancel: cancel.clone(),
            after: 2,
            seen: std::cell::Cell::new(0),
        });
        let report = ReportAggregator::new(runner, 1)
            .with_pause(Duration::from_secs(30))
            .run_all(&scenarios());

        assert!(report.interrupted);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[1].name, "second");
    }

    #[test]
    fn test_cancel_during_last_scenario_marks_interrupted() {
        let cancel = CancellationToken::new();
        let scenarios = scenarios();
        let runner = ScenarioRunner::new(cancel.clone()).with_cost_model(CancelAfter {
            cancel: cancel.clone(),
            after: scenarios.len(),
            seen: std::cell::Cell::new(0),
        });
        let report = ReportAggregator::new(runner, 1).run_all(&scenarios);

        assert!(cancel.is_cancelled());
        assert!(report.interrupted);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.results[2].name, "third");
    }

    #[test]
    fn test_scenario_seeds_differ_per_index() {
        assert_eq!(scenario_seed(10, 0), 10);
        assert_ne!(scenario_seed(10, 0), scenario_seed(10, 1));
        assert_eq!(scenario_seed(u64::MAX, 1), 0);
    }

    #[test]
    fn test_from_config_applies_model_settings() {
        let mut config = Config::default();
        config.average_transaction_size = 500;
        config.compression_cost_per_mb = Duration::ZERO;
        config.pause_between_scenarios = Duration::ZERO;
        config.scenarios = vec![Scenario::new("only", 50_000)];

        let report = ReportAggregator::from_config(&config, 3, CancellationToken::new())
            .run_all(&config.scenarios);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].transaction_count, 100);
    }
}
