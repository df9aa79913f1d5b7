use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    config.validate()?;

    info!("Loaded {} scenarios", config.scenarios.len());
    Ok(config)
}

/// Load `config_path` when given, otherwise fall back to validated defaults
pub fn load_or_default(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            info!("No configuration file given, using the reference scenario suite");
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// CLI arguments that override configured settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub no_delay: bool,
}

/// Apply CLI overrides to a loaded configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {}", seed);
        config.seed = Some(seed);
    }

    if overrides.no_delay {
        info!("Simulated compression delay and scenario pauses disabled");
        config.compression_cost_per_mb = std::time::Duration::ZERO;
        config.pause_between_scenarios = std::time::Duration::ZERO;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
