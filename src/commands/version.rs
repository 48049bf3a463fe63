//! Version command implementation
//!
//! Prints the installer release and the components a default run installs.

use crate::config::Settings;
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    for line in report(&Settings::default()) {
        println!("{line}");
    }
    Ok(())
}

fn report(settings: &Settings) -> Vec<String> {
    let runtimes: Vec<&str> = settings.runtimes.iter().map(|r| r.version.as_str()).collect();
    vec![
        format!("oci8-installer {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Installs:".to_string(),
        format!(
            "  {} extension: {}",
            settings.extension.name, settings.extension.version
        ),
        format!("  Instant Client: {}", settings.oracle.client_dir_name),
        format!("  PHP runtimes: {}", runtimes.join(", ")),
        String::new(),
        "Build info:".to_string(),
        format!("  Profile: {}", build_profile()),
    ]
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
