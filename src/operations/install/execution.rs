//! Mutating install steps
//!
//! Each function covers one workflow stage and checks whether its work is
//! already done before touching the host.

use crate::config::{PhpRuntime, SystemSettings};
use crate::error::Result;
use crate::host::{CommandLine, Host};
use crate::service::{self, RestartOutcome};
use crate::ui::Reporter;

/// Install the OS packages the build needs
pub fn install_dependencies(
    host: &dyn Host,
    system: &SystemSettings,
    runtime: &PhpRuntime,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let packages = system.packages_for(runtime);
    let apt = |args: &[&str]| {
        CommandLine::new(&system.package_manager)
            .args(args.iter().copied())
            .env("DEBIAN_FRONTEND", "noninteractive")
    };

    host.run(&apt(&["update"]))?;
    host.run(&apt(&["install", "-y"]).args(packages.iter().map(String::as_str)))?;
    reporter.success(&format!("Installed {}", packages.join(", ")));
    Ok(())
}

/// Point the legacy libaio soname at the renamed library
pub fn ensure_libaio_link(
    host: &dyn Host,
    system: &SystemSettings,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let legacy = &system.libaio_legacy;
    if host.exists(legacy) {
        reporter.skip(&format!("{} already present", legacy.display()));
        return Ok(());
    }
    host.symlink(&system.libaio_current, legacy)?;
    reporter.success(&format!(
        "Linked {} -> {}",
        legacy.display(),
        system.libaio_current.display()
    ));
    Ok(())
}

/// Restart the runtime's FPM unit; problems are reported, never fatal
pub fn restart_fpm(host: &dyn Host, runtime: &PhpRuntime, reporter: &mut dyn Reporter) {
    let unit = &runtime.fpm_service;
    match service::restart(host, unit) {
        RestartOutcome::Restarted => reporter.success(&format!("Restarted {unit}")),
        RestartOutcome::NotInstalled => {
            reporter.skip(&format!("{unit} is not installed, nothing to restart"));
        }
        RestartOutcome::Failed(reason) => {
            tracing::warn!(unit = %unit, %reason, "service restart failed");
            reporter.warn(&format!("Could not restart {unit}: {reason}"));
        }
    }
}
