//! # AutoCrate CLI
//!
//! Compute a shipping crate design and export the NX expression list.
//!
//! ```text
//! autocrate calc --length 96 --width 48 --height 30 --weight 500
//! autocrate calc -i job.acj --format summary
//! autocrate calc -i crate.toml -o exports/
//! autocrate quick-test
//! autocrate init-config
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`); stdout carries only the
//! requested output.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};

use autocrate_cli::commands::{self, OutputFormat};
use autocrate_cli::config::{self, AutocrateConfig};
use autocrate_cli::resolve::InputArgs;
use autocrate_core::CalcError;

#[derive(Parser)]
#[command(name = "autocrate", version, about = "Shipping crate design and NX expression export")]
struct Cli {
    /// Config file (overrides AUTOCRATE_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a crate design
    Calc {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Exp)]
        format: OutputFormat,
        /// Output file or directory (default: config output directory, else stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Run the built-in quick test crates
    QuickTest,
    /// Write a default config file
    InitConfig {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Calc {
            inputs,
            format,
            output,
        } => {
            let config = AutocrateConfig::resolve(cli.config.as_deref())?;
            let inputs = inputs.resolve()?;
            let mut stdout = std::io::stdout().lock();
            commands::run_calc(
                &inputs,
                &config,
                format,
                output.as_deref(),
                Utc::now(),
                &mut stdout,
            )?;
        }
        Commands::QuickTest => {
            let config = AutocrateConfig::resolve(cli.config.as_deref())?;
            let mut stdout = std::io::stdout().lock();
            commands::run_quick_test(&config, Utc::now(), &mut stdout)?;
        }
        Commands::InitConfig { force } => {
            let path = cli.config.unwrap_or_else(config::config_path);
            config::init_config(&path, force)?;
            println!("Config written to {}", path.display());
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<CalcError>() {
            Some(CalcError::ValidationFailed { violations }) => {
                eprintln!("Invalid crate inputs:");
                for violation in violations {
                    eprintln!("  - {violation}");
                }
            }
            _ => eprintln!("{e:#}"),
        }
        std::process::exit(1);
    }
}
