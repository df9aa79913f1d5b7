//! Block-height activation of modeled scaling features.

use serde::{Deserialize, Serialize};

/// Reference throughput before any scaling feature, in transactions per second
pub const BASE_TPS: f64 = 7.0;

/// One feature gated by a block height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureActivation {
    pub feature: String,
    /// First height at which the feature is active
    pub height: u64,
    #[serde(default)]
    pub description: String,
    /// Factor applied to the throughput estimate while active
    #[serde(default = "default_multiplier")]
    pub throughput_multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl FeatureActivation {
    pub fn new(feature: &str, height: u64, description: &str, throughput_multiplier: f64) -> Self {
        Self {
            feature: feature.to_string(),
            height,
            description: description.to_string(),
            throughput_multiplier,
        }
    }

    pub fn is_active(&self, height: u64) -> bool {
        height >= self.height
    }
}

/// State of one feature at a given height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStatus {
    pub feature: String,
    pub activation_height: u64,
    pub active: bool,
    pub description: String,
}

/// Ordered list of feature activations, ascending by height
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationSchedule {
    activations: Vec<FeatureActivation>,
}

impl Default for ActivationSchedule {
    fn default() -> Self {
        Self::new(default_activations())
    }
}

/// Canonical ordering, then unbounded blocks, then compressed relay
pub fn default_activations() -> Vec<FeatureActivation> {
    vec![
        FeatureActivation::new("ctor", 1000, "Canonical transaction ordering", 3.0),
        FeatureActivation::new(
            "unbounded_blocks",
            2000,
            "Governance-controlled block size limit",
            15.8,
        ),
        FeatureActivation::new(
            "xthinner",
            3000,
            "Compressed block relay (~90% bandwidth reduction)",
            3.0,
        ),
    ]
}

/// Check that activation heights are strictly ascending and names unique
pub fn validate_activations(activations: &[FeatureActivation]) -> Result<(), String> {
    for pair in activations.windows(2) {
        if pair[1].height <= pair[0].height {
            return Err(format!(
                "activation of '{}' at {} must come after '{}' at {}",
                pair[1].feature, pair[1].height, pair[0].feature, pair[0].height
            ));
        }
    }

    for (i, activation) in activations.iter().enumerate() {
        if activation.feature.trim().is_empty() {
            return Err(format!("activation {} has an empty feature name", i));
        }
        if activations[..i].iter().any(|a| a.feature == activation.feature) {
            return Err(format!("feature '{}' is scheduled twice", activation.feature));
        }
        if !(activation.throughput_multiplier > 0.0) {
            return Err(format!(
                "feature '{}' has non-positive throughput multiplier {}",
                activation.feature, activation.throughput_multiplier
            ));
        }
    }

    Ok(())
}

impl ActivationSchedule {
    pub fn new(activations: Vec<FeatureActivation>) -> Self {
        Self { activations }
    }

    pub fn activations(&self) -> &[FeatureActivation] {
        &self.activations
    }

    /// Whether `feature` is active at `height`; unknown features are inactive
    pub fn is_active(&self, feature: &str, height: u64) -> bool {
        self.activations
            .iter()
            .any(|a| a.feature == feature && a.is_active(height))
    }

    pub fn active_count(&self, height: u64) -> usize {
        self.activations.iter().filter(|a| a.is_active(height)).count()
    }

    pub fn all_active(&self, height: u64) -> bool {
        self.active_count(height) == self.activations.len()
    }

    pub fn statuses(&self, height: u64) -> Vec<FeatureStatus> {
        self.activations
            .iter()
            .map(|a| FeatureStatus {
                feature: a.feature.clone(),
                activation_height: a.height,
                active: a.is_active(height),
                description: a.description.clone(),
            })
            .collect()
    }

    /// Modeled throughput at `height`: [`BASE_TPS`] times every active multiplier
    pub fn theoretical_tps(&self, height: u64) -> f64 {
        self.activations
            .iter()
            .filter(|a| a.is_active(height))
            .fold(BASE_TPS, |tps, a| tps * a.throughput_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_thresholds() {
        let schedule = ActivationSchedule::default();

        assert_eq!(schedule.active_count(0), 0);
        assert_eq!(schedule.active_count(999), 0);

        assert!(schedule.is_active("ctor", 1000));
        assert!(!schedule.is_active("unbounded_blocks", 1000));
        assert_eq!(schedule.active_count(1999), 1);

        assert_eq!(schedule.active_count(2000), 2);
        assert!(!schedule.all_active(2999));
        assert!(schedule.all_active(3000));
        assert!(!schedule.is_active("unknown", 10_000));
    }

    #[test]
    fn test_statuses_keep_schedule_order() {
        let statuses = ActivationSchedule::default().statuses(2500);
        let names: Vec<&str> = statuses.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(names, vec!["ctor", "unbounded_blocks", "xthinner"]);
        let active: Vec<bool> = statuses.iter().map(|s| s.active).collect();
        assert_eq!(active, vec![true, true, false]);
    }

    #[test]
    fn test_theoretical_tps() {
        let schedule = ActivationSchedule::default();
        assert_eq!(schedule.theoretical_tps(0), 7.0);
        assert_eq!(schedule.theoretical_tps(1000), 21.0);
        assert!((schedule.theoretical_tps(3000) - 7.0 * 3.0 * 15.8 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_activations() {
        assert!(validate_activations(&default_activations()).is_ok());
        assert!(validate_activations(&[]).is_ok());

        let mut descending = default_activations();
        descending.swap(0, 2);
        assert!(validate_activations(&descending).is_err());

        let equal = vec![
            FeatureActivation::new("a", 10, "", 1.0),
            FeatureActivation::new("b", 10, "", 1.0),
        ];
        assert!(validate_activations(&equal).is_err());

        let duplicate = vec![
            FeatureActivation::new("a", 10, "", 1.0),
            FeatureActivation::new("a", 20, "", 1.0),
        ];
        assert!(validate_activations(&duplicate).is_err());

        let zero = vec![FeatureActivation::new("a", 10, "", 0.0)];
        assert!(validate_activations(&zero).is_err());
    }
}
