//! Install command implementation
//!
//! Wires the real host, a prompter matching the kind of stdin and the console
//! reporter into the install operation, then prints how the run ended.

use std::io::IsTerminal;
use std::path::Path;

use crate::cli::InstallArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::host::SystemHost;
use crate::operations::install::{InstallOperation, InstallOptions, Outcome};
use crate::prompt::{LinePrompter, Prompter, TerminalPrompter};
use crate::ui::{ConsoleReporter, display};

fn execute(
    settings: &Settings,
    host: &SystemHost,
    prompter: &mut dyn Prompter,
    options: InstallOptions,
) -> Result<Outcome> {
    let mut reporter = ConsoleReporter;
    InstallOperation::new(settings, host, prompter, &mut reporter, options).execute()
}

/// Run install command
pub fn run(config: Option<&Path>, verbose: bool, args: &InstallArgs) -> Result<()> {
    let settings = Settings::load(config)?;
    let host = SystemHost::new(verbose);
    let options = InstallOptions::from(args);

    let outcome = if std::io::stdin().is_terminal() {
        execute(&settings, &host, &mut TerminalPrompter, options)?
    } else {
        let mut prompter = LinePrompter::new(std::io::stdin().lock(), std::io::stdout());
        execute(&settings, &host, &mut prompter, options)?
    };

    tracing::debug!(?outcome, "install finished");
    println!();
    println!(
        "{}",
        display::outcome_line(&outcome, &settings.extension.name)
    );
    if let Outcome::Installed { runtime, .. } = &outcome {
        println!(
            "Check with: {} -m | grep -i {}",
            runtime.binary, settings.extension.name
        );
    }
    Ok(())
}
