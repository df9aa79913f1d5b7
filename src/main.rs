use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

use blocksim::analysis::{self, Report, ReportAggregator};
use blocksim::config_loader::{self, CliOverrides};
use blocksim::live::{collect_live_annotation, SnapshotFile};
use blocksim::simulation::CancellationToken;

/// Large-block simulation and bandwidth reporting harness
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a YAML configuration file (reference scenarios when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for JSON and text reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON snapshot of live node data for activation annotations
    #[arg(long)]
    live_snapshot: Option<PathBuf>,

    /// Seed for transaction generation
    #[arg(long)]
    seed: Option<u64>,

    /// Skip simulated compression delays and pauses between scenarios
    #[arg(long)]
    no_delay: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(&args.log_level)).init();

    info!("Starting large block capability simulation");

    let mut config = config_loader::load_or_default(args.config.as_deref())?;
    config_loader::apply_overrides(
        &mut config,
        &CliOverrides {
            seed: args.seed,
            no_delay: args.no_delay,
        },
    )?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Using seed {} (pass --seed {} to reproduce)", seed, seed);

    let cancel = CancellationToken::new();
    cancel
        .install_ctrlc_handler()
        .wrap_err("Failed to install Ctrl+C handler")?;

    let aggregator = ReportAggregator::from_config(&config, seed, cancel);
    let mut report = aggregator.run_all(&config.scenarios);

    if let Some(path) = &args.live_snapshot {
        info!("Reading live chain data from {:?}", path);
        let source = SnapshotFile::new(path);
        report = report.with_live(collect_live_annotation(&source, &config.activation_schedule()));
    }

    if let Some(output_dir) = &args.output {
        fs::create_dir_all(output_dir).wrap_err_with(|| {
            format!("Failed to create output directory '{}'", output_dir.display())
        })?;
        analysis::generate_json_report(&report, &output_dir.join("block_capability_report.json"))?;
        analysis::generate_text_report(&report, &output_dir.join("block_capability_report.txt"))?;
    }

    println!("{}", console_report(&report, args.output.is_some()));

    if report.interrupted {
        println!("Simulation interrupted by user");
    }

    Ok(())
}

/// Console output: the full text report, or only the summary when the
/// report was already written to files
fn console_report(report: &Report, written_to_files: bool) -> String {
    if written_to_files {
        analysis::render_summary(report)
    } else {
        analysis::report::render_text_report(report)
    }
}
