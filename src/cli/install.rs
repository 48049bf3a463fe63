use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                   Choose the runtime interactively:\n    sudo oci8-installer install\n\n\
                   Install for PHP 8.3 without prompting:\n    sudo oci8-installer install --php 8.3 --yes")]
pub struct InstallArgs {
    /// Install for this PHP version (e.g. 8.3) instead of choosing from a menu
    #[arg(long, value_name = "X.Y")]
    pub php: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
