//! PHP-FPM service control through systemd

use crate::host::{CommandLine, Host};

/// Result of trying to restart a runtime's FPM unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartOutcome {
    Restarted,
    /// No unit file for the service
    NotInstalled,
    /// Restart was attempted and failed
    Failed(String),
}

fn unit_name(service: &str) -> String {
    format!("{service}.service")
}

/// Whether systemd knows a unit for `service`
pub fn unit_exists(host: &dyn Host, service: &str) -> bool {
    let cmd = CommandLine::new("systemctl")
        .args(["list-unit-files", "--no-legend"])
        .arg(unit_name(service));
    match host.capture(&cmd) {
        Ok(listing) => !listing.trim().is_empty(),
        Err(e) => {
            tracing::debug!(service, error = %e, "unit lookup failed");
            false
        }
    }
}

/// Restart the unit if it exists
pub fn restart(host: &dyn Host, service: &str) -> RestartOutcome {
    if !unit_exists(host, service) {
        return RestartOutcome::NotInstalled;
    }
    match host.run(&CommandLine::new("systemctl").arg("restart").arg(unit_name(service))) {
        Ok(()) => RestartOutcome::Restarted,
        Err(e) => RestartOutcome::Failed(e.to_string()),
    }
}
