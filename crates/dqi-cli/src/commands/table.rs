//! Table command implementation.

use anyhow::Result;
use console::style;

use dqi_xorsat::matrix::format_bits;

use super::common::{Overrides, build_solver, load_config};

/// Execute the table command.
pub fn execute(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path, Overrides::default())?;
    let solver = build_solver(config)?;

    println!("{} Parity-check matrix:", style("→").cyan().bold());
    for line in solver.matrix().to_string().lines() {
        println!("  {line}");
    }

    let table = solver.table();
    println!(
        "\n{} Syndrome table ({} entries):",
        style("✓").green().bold(),
        table.len()
    );
    println!("  {:<8}  {:<8}  weight", "syndrome", "error");
    for (syndrome, error) in table.iter() {
        println!(
            "  {:<8}  {:<8}  {}",
            style(format_bits(syndrome)).cyan(),
            format_bits(error),
            error.count_ones()
        );
    }
    Ok(())
}
