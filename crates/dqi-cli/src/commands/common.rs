//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use dqi_xorsat::{CorrectionMode, DqiConfig, DqiMaxXorsat, SolutionCounts};

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub shots: Option<u32>,
    pub seed: Option<u64>,
    pub correction: Option<CorrectionMode>,
}

/// Load configuration: file (or defaults), then `DQI_*` variables, then flags.
pub fn load_config(path: Option<&str>, overrides: Overrides) -> Result<DqiConfig> {
    let mut config = DqiConfig::load(path.map(Path::new)).with_context(|| match path {
        Some(p) => format!("Failed to load configuration from {p}"),
        None => "Invalid configuration from environment".to_string(),
    })?;

    if let Some(shots) = overrides.shots {
        config.shots = shots;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(correction) = overrides.correction {
        config.correction = correction;
    }

    config.validate().context("Invalid command-line override")?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Build the solver for a configuration.
pub fn build_solver(config: DqiConfig) -> Result<DqiMaxXorsat> {
    DqiMaxXorsat::new(config).context("Failed to initialise solver")
}

/// Print aggregated solution counts with a bar per solution.
pub fn print_solutions(solutions: &SolutionCounts) {
    println!(
        "\n{} Solutions ({} shots):",
        style("✓").green().bold(),
        solutions.total()
    );

    let sorted = solutions.sorted();
    let total = solutions.total().max(1) as f64;

    for (solution, count) in sorted.iter().take(16) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(solution).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more solutions", sorted.len() - 16);
    }

    if let Some((best, count)) = solutions.best() {
        println!(
            "\n  Best solution: {} ({} counts)",
            style(best).yellow().bold(),
            count
        );
    }
}
