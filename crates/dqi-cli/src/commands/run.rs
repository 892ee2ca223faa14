//! Run command implementation.

use anyhow::{Result, bail};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use dqi_adapter_sim::SimulatorBackend;
use dqi_hal::Backend;
use dqi_xorsat::CorrectionMode;

use super::common::{Overrides, build_solver, load_config, print_solutions};

/// Execute the run command.
pub async fn execute(
    config_path: Option<&str>,
    shots: Option<u32>,
    seed: Option<u64>,
    correction: Option<CorrectionMode>,
) -> Result<()> {
    let config = load_config(
        config_path,
        Overrides {
            shots,
            seed,
            correction,
        },
    )?;

    println!(
        "{} Running DQI Max-XORSAT on {} ({} shots, {} correction)",
        style("→").cyan().bold(),
        style("simulator").yellow(),
        config.shots,
        style(config.correction).green()
    );

    let backend = match config.seed {
        Some(seed) => SimulatorBackend::new().with_seed(seed),
        None => SimulatorBackend::new(),
    };
    let solver = build_solver(config)?;

    let avail = backend.availability().await?;
    if !avail.is_available {
        bail!("Backend '{}' is not available", backend.name());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Assembling and simulating...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let solutions = solver.run(&backend).await;
    spinner.finish_and_clear();

    print_solutions(&solutions?);
    Ok(())
}
