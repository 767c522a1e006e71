//! mcinstall - quick-install and provision a fresh Miniconda
//!
//! Downloads the platform's Miniconda installer into a shared cache, installs
//! it unattended into a destination directory and layers pip/conda packages
//! on top, appending every executed command to an audit log.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod audit;
mod cli;
mod commands;
mod config;
mod error;
mod installer;
mod platform;
mod process;
mod progress;
mod provision;

use cli::Cli;
use config::{Config, HostInfo, UnsupportedPlatform};

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "MCINSTALL_LOG";

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "mcinstall=debug" } else { "warn" })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn main() {
    // An unknown OS is not an error: say so and leave before arguments are
    // validated or anything is touched
    let host = HostInfo::current();
    if let Err(unsupported) = UnsupportedPlatform::check(&host) {
        println!("{unsupported}");
        std::process::exit(0);
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(system = %host.system, machine = %host.machine, "detected host");

    if let Some(shell) = cli.completions {
        commands::completions::run(shell);
        return;
    }

    let result = Config::resolve(&host, &cli.overrides())
        .map_err(|unsupported| error::ProvisionError::ConfigInvalid {
            message: unsupported.to_string(),
        })
        .and_then(|config| {
            if cli.show_config {
                commands::show_config::run(&config)
            } else {
                commands::provision::run(&cli, &config)
            }
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
