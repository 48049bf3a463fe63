//! oci8-installer - OCI8 PHP extension installer
//!
//! Detects the PHP runtimes on a Debian or Ubuntu host, sets up Oracle Instant
//! Client and builds, enables and verifies the OCI8 extension for one of them.
//! Every step checks whether its result already exists, so re-running after a
//! failure or on a configured host is safe.

use clap::Parser;

mod cli;
mod commands;
mod config;
mod detection;
mod download;
mod error;
mod extension;
mod host;
mod operations;
mod oracle;
mod prompt;
mod service;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands, InstallArgs};

/// Set up diagnostic logging on stderr
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug and the
/// default is warnings only.
fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "oci8_installer=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        None => commands::install::run(config, cli.verbose, &InstallArgs::default()),
        Some(Commands::Install(args)) => commands::install::run(config, cli.verbose, &args),
        Some(Commands::Status(args)) => commands::status::run(config, cli.verbose, &args),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("Error: {e}");
        if let Some(help) = miette::Diagnostic::help(&e) {
            eprintln!("{help}");
        }
        std::process::exit(1);
    }
}
