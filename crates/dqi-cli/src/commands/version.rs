//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - DQI circuit assembly for Max-XORSAT",
        style("dqi").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  dqi-ir           Circuit IR with mid-circuit measurement and branching");
    println!("  dqi-hal          Backend abstraction");
    println!("  dqi-xorsat       Syndrome table, encoder, Dicke preparer, corrector");
    println!("  dqi-adapter-sim  Sparse statevector simulator");
    println!("  dqi-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
