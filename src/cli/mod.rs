//! CLI definitions using clap derive API
//!
//! Argument types live in one submodule per command:
//! - install: Install command arguments
//! - status: Status command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod status;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use status::StatusArgs;

/// oci8-installer - OCI8 PHP extension installer
///
/// Installs Oracle Instant Client and builds the OCI8 extension for one PHP runtime.
#[derive(Parser, Debug)]
#[command(
    name = "oci8-installer",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Idempotent installer for the OCI8 PHP extension",
    long_about = "Detects installed PHP runtimes (8.1 to 8.4), sets up Oracle Instant Client, \
                  builds the OCI8 extension against the selected runtime, enables it and restarts \
                  PHP-FPM. Steps whose results are already present are skipped.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  sudo oci8-installer                     \x1b[90m# Interactive install\x1b[0m\n   \
                  sudo oci8-installer install --php 8.3 -y \x1b[90m# Unattended install for PHP 8.3\x1b[0m\n   \
                  oci8-installer status                   \x1b[90m# Show what is installed\x1b[0m\n   \
                  oci8-installer status --json            \x1b[90m# Same, as JSON\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// YAML file overriding the built-in settings
    #[arg(long, short = 'c', global = true, env = "OCI8_INSTALLER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Runs `install` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the extension for one PHP runtime (default)
    Install(InstallArgs),

    /// Show Oracle client and extension status without changing anything
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
