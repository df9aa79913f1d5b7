//! Report generation for block capability runs.
//!
//! Generates both JSON and human-readable text reports.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};

use super::types::*;

/// Generate JSON report
pub fn generate_json_report(report: &Report, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&report.to_document())
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(report: &Report, output_path: &Path) -> Result<()> {
    fs::write(output_path, render_text_report(report))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Render the text report
pub fn render_text_report(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(80));
    lines.push("                      LARGE BLOCK CAPABILITY REPORT".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    lines.push(format!("Seed: {}", report.seed));
    if report.interrupted {
        lines.push(format!(
            "Run interrupted: {} scenario(s) completed before the stop",
            report.results.len()
        ));
    }
    lines.push(String::new());

    let Some(summary) = report.summary() else {
        lines.push("No results available".to_string());
        push_skipped(&mut lines, report);
        push_live(&mut lines, report);
        lines.push("=".repeat(80));
        return lines.join("\n");
    };

    // Per-scenario table
    lines.push("PERFORMANCE SUMMARY:".to_string());
    lines.push(format!(
        "{:<30} {:>12} {:>15} {:>15} {:>12}",
        "Test", "Size (MB)", "Transactions", "Compressed (MB)", "Efficiency"
    ));
    lines.push("-".repeat(88));
    for result in &report.results {
        let name: String = result.name.chars().take(29).collect();
        lines.push(format!(
            "{:<30} {:>12.1} {:>15} {:>15.1} {:>11.1}%",
            name,
            result.actual_size_mb(),
            result.transaction_count,
            result.compressed_size_mb(),
            result.bandwidth_savings_percent
        ));
    }
    lines.push(String::new());

    lines.push("Stage Timings (seconds):".to_string());
    for result in &report.results {
        lines.push(format!(
            "  {}: generation {:.3}, CTOR {:.3}, compression {:.3}, total {:.3}",
            result.name,
            result.generation_duration.as_secs_f64(),
            result.ordering_duration.as_secs_f64(),
            result.compression_duration.as_secs_f64(),
            result.total_duration().as_secs_f64()
        ));
    }
    lines.push(String::new());

    // Largest block
    let largest = &summary.largest;
    lines.push("MAXIMUM CAPABILITY DEMONSTRATED:".to_string());
    lines.push(format!("  Largest Block: {:.1} MB ({})", largest.actual_size_mb, largest.test_name));
    lines.push(format!("  Transactions: {}", largest.num_transactions));
    lines.push(format!(
        "  Network Transmission: {:.1} MB (after compression)",
        largest.compressed_size_mb
    ));
    lines.push(format!("  Bandwidth Savings: {:.1}%", largest.network_efficiency));
    if let Some(advantage) = summary.largest_advantage {
        lines.push(format!(
            "  vs {} baseline: {:.1}x less data on the wire",
            report.comparison.competitor, advantage
        ));
    }
    lines.push(String::new());

    // Competitor comparison
    if let Some(ref comparison) = summary.comparison {
        lines.push(format!("COMPARISON WITH {}:", comparison.competitor.to_uppercase()));
        lines.push(format!(
            "  {} block: {:.1} MB network transmission",
            comparison.competitor, comparison.baseline_mb
        ));
        lines.push(format!(
            "  {}: {:.1} MB network transmission",
            comparison.test_name, comparison.compressed_size_mb
        ));
        lines.push(format!(
            "  Network Efficiency Advantage: {:.1}% bandwidth savings",
            comparison.network_efficiency
        ));
        lines.push(format!(
            "  Transmission Advantage: {:.1}x more efficient",
            comparison.transmission_advantage
        ));
        lines.push(String::new());
    }

    // Scaling
    if !summary.scaling.is_empty() {
        lines.push("CTOR Ordering Cost (sort is O(n log n)):".to_string());
        for point in &summary.scaling {
            lines.push(format!(
                "  {}: {:.1} ns/tx over {} transactions",
                point.test_name, point.ordering_ns_per_tx, point.num_transactions
            ));
        }
        lines.push(String::new());
    }

    push_skipped(&mut lines, report);
    push_live(&mut lines, report);

    lines.push("NOTE: compression figures come from a fixed-ratio bandwidth model,".to_string());
    lines.push("not from encoding real blocks.".to_string());
    lines.push(String::new());

    // Footer
    lines.push("=".repeat(80));

    lines.join("\n")
}

fn push_skipped(lines: &mut Vec<String>, report: &Report) {
    if report.skipped.is_empty() {
        return;
    }
    lines.push("Skipped Scenarios:".to_string());
    for skipped in &report.skipped {
        lines.push(format!(
            "  {} ({:.0} MB): {}",
            skipped.test_name, skipped.target_size_mb, skipped.reason
        ));
    }
    lines.push(String::new());
}

fn push_live(lines: &mut Vec<String>, report: &Report) {
    let Some(ref live) = report.live else {
        return;
    };

    lines.push(format!("LIVE CHAIN STATUS (height {}):", live.height));
    for feature in &live.features {
        let status = if feature.active { "ACTIVE" } else { "PENDING" };
        lines.push(format!(
            "  {}: {} (block {}+) {}",
            feature.feature.to_uppercase(),
            status,
            feature.activation_height,
            feature.description
        ));
    }
    lines.push(format!(
        "  Active Features: {}/{}",
        live.active_features,
        live.features.len()
    ));
    lines.push(format!("  Theoretical TPS: {:.0}", live.theoretical_tps));
    if let Some(ref mempool) = live.mempool {
        lines.push(format!(
            "  Mempool Capacity: {:.1} TB ({:.0}x a 300 MB mempool)",
            mempool.max_tb, mempool.reference_multiple
        ));
    }
    lines.push(String::new());
}

/// Render the short console summary
pub fn render_summary(report: &Report) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(String::new());
    lines.push("=== LARGE BLOCK CAPABILITY SUMMARY ===".to_string());
    lines.push(String::new());

    let Some(summary) = report.summary() else {
        lines.push("No results available".to_string());
        if report.interrupted {
            lines.push("Run interrupted before any scenario completed".to_string());
        }
        lines.push(String::new());
        return lines.join("\n");
    };

    lines.push(format!(
        "{:<30} {:>12} {:>15} {:>15} {:>12}",
        "Test", "Size (MB)", "Transactions", "Compressed (MB)", "Efficiency"
    ));
    lines.push("-".repeat(88));
    for result in &report.results {
        let name: String = result.name.chars().take(29).collect();
        lines.push(format!(
            "{:<30} {:>12.1} {:>15} {:>15.1} {:>11.1}%",
            name,
            result.actual_size_mb(),
            result.transaction_count,
            result.compressed_size_mb(),
            result.bandwidth_savings_percent
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "Largest block: {:.1} MB -> {:.1} MB on the wire",
        summary.largest.actual_size_mb, summary.largest.compressed_size_mb
    ));

    if let Some(ref comparison) = summary.comparison {
        lines.push(format!(
            "{}: {:.1} MB vs {:.1} MB ({:.1}x)",
            comparison.competitor,
            comparison.baseline_mb,
            comparison.compressed_size_mb,
            comparison.transmission_advantage
        ));
    }

    if !report.skipped.is_empty() {
        lines.push(format!("Skipped scenarios: {}", report.skipped.len()));
    }

    if let Some(ref live) = report.live {
        lines.push(format!(
            "Live chain height {}: {}/{} features active",
            live.height,
            live.active_features,
            live.features.len()
        ));
    }

    if report.interrupted {
        lines.push("Run interrupted: showing completed scenarios only".to_string());
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Print a summary to stdout
pub fn print_summary(report: &Report) {
    println!("{}", render_summary(report));
}
