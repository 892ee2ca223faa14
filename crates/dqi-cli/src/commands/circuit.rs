//! Circuit command implementation.

use anyhow::Result;
use console::style;

use dqi_ir::Circuit;
use dqi_xorsat::CorrectionMode;

use super::common::{Overrides, build_solver, load_config};

/// Execute the circuit command.
pub fn execute(config_path: Option<&str>, correction: Option<CorrectionMode>) -> Result<()> {
    let config = load_config(
        config_path,
        Overrides {
            correction,
            ..Overrides::default()
        },
    )?;
    let mode = config.correction;
    let circuit = build_solver(config)?.assemble()?;

    println!(
        "{} Assembled {} ({} correction)",
        style("✓").green().bold(),
        style(circuit.name()).cyan(),
        style(mode).yellow()
    );
    print_summary(&circuit);
    Ok(())
}

fn print_summary(circuit: &Circuit) {
    println!("\nQuantum registers:");
    for reg in circuit.qregs() {
        println!("  {:<16} {:>2} qubits", style(reg.name()).cyan(), reg.len());
    }

    println!("\nClassical registers:");
    for reg in circuit.cregs() {
        println!("  {:<16} {:>2} bits", style(reg.name()).cyan(), reg.len());
    }

    println!("\nOperations:");
    for (name, count) in circuit.count_ops() {
        println!("  {name:<10} {count:>5}");
    }

    println!();
    println!("  Qubits: {}", circuit.num_qubits());
    println!("  Clbits: {}", circuit.num_clbits());
    println!("  Size:   {}", circuit.size());
    println!("  Depth:  {}", style(circuit.depth()).yellow());
}
