//! DQI Command-Line Interface
//!
//! Assemble, inspect and simulate the DQI Max-XORSAT circuit.
//!
//! ```text
//!   dqi circuit            register / instruction / depth summary
//!   dqi table              syndrome lookup table
//!   dqi run --shots 1024   simulate and aggregate solutions
//!   dqi version
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use dqi_xorsat::CorrectionMode;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{circuit, run, table, version};

/// DQI - syndrome-decoding circuits for Max-XORSAT
#[derive(Parser, Debug)]
#[command(name = "dqi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the circuit and print a summary
    Circuit {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Correction mode (legacy, full-match)
        #[arg(long)]
        correction: Option<CorrectionMode>,
    },

    /// Print the syndrome lookup table
    Table {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Run the circuit on the local simulator
    Run {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<String>,

        /// Number of shots (overrides config and DQI_SHOTS)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Simulator seed
        #[arg(long)]
        seed: Option<u64>,

        /// Correction mode (legacy, full-match)
        #[arg(long)]
        correction: Option<CorrectionMode>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Circuit { config, correction } => {
            circuit::execute(config.as_deref(), correction)
        }

        Commands::Table { config } => table::execute(config.as_deref()),

        Commands::Run {
            config,
            shots,
            seed,
            correction,
        } => run::execute(config.as_deref(), shots, seed, correction).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "dqi",
            "-vv",
            "run",
            "--shots",
            "256",
            "--seed",
            "9",
            "--correction",
            "full-match",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                config,
                shots,
                seed,
                correction,
            } => {
                assert!(config.is_none());
                assert_eq!(shots, Some(256));
                assert_eq!(seed, Some(9));
                assert_eq!(correction, Some(CorrectionMode::FullMatch));
            }
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_defaults_leave_overrides_unset() {
        let cli = Cli::try_parse_from(["dqi", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                shots, correction, ..
            } => {
                assert!(shots.is_none());
                assert!(correction.is_none());
            }
            other => panic!("Expected Run, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["dqi", "circuit", "--correction", "sometimes"]).is_err());
    }

    #[test]
    fn test_parse_table_with_config() {
        let cli = Cli::try_parse_from(["dqi", "table", "-c", "dqi.yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Table { config: Some(ref c) } if c == "dqi.yaml"
        ));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
