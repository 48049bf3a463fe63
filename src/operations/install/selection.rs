//! Runtime selection and the confirmation gate

use crate::config::PhpRuntime;
use crate::detection::{Detection, RuntimeStatus};
use crate::error::{self, Result};
use crate::prompt::Prompter;
use crate::ui::Reporter;

/// Resolve a runtime named on the command line
fn preselected<'d>(detection: &'d Detection, version: &str) -> Result<&'d PhpRuntime> {
    let Some(status) = detection.status_of(version) else {
        return Err(error::runtime::unknown(version));
    };
    match status {
        RuntimeStatus::Missing => detection
            .installable()
            .into_iter()
            .find(|r| r.version == version)
            .ok_or_else(|| error::runtime::unknown(version)),
        RuntimeStatus::Absent => Err(error::runtime::not_installable(
            version,
            "it is not installed on this host",
        )),
        RuntimeStatus::Loaded => Err(error::runtime::not_installable(
            version,
            "the extension is already loaded",
        )),
    }
}

/// Pick the runtime to install for
///
/// A version named on the command line wins. Otherwise a single installable
/// runtime is chosen without asking, and several produce a numbered menu.
pub fn choose<'d>(
    detection: &'d Detection,
    requested: Option<&str>,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<&'d PhpRuntime> {
    if let Some(version) = requested {
        let runtime = preselected(detection, version)?;
        reporter.success(&format!("Using {} from the command line", runtime.label()));
        return Ok(runtime);
    }

    let installable = detection.installable();
    if let [only] = installable[..] {
        reporter.success(&format!("Selected {} (only candidate)", only.label()));
        return Ok(only);
    }

    let items: Vec<String> = installable.iter().map(|r| r.label()).collect();
    let index = prompter.select("Select the PHP version to install for:", &items)?;
    let runtime = installable
        .get(index)
        .copied()
        .ok_or_else(|| error::runtime::unknown(index.to_string()))?;
    reporter.success(&format!("Selected {}", runtime.label()));
    Ok(runtime)
}

/// Ask before changing anything; `true` means go ahead
pub fn confirm(
    runtime: &PhpRuntime,
    extension: &str,
    assume_yes: bool,
    prompter: &mut dyn Prompter,
    reporter: &mut dyn Reporter,
) -> Result<bool> {
    if assume_yes {
        reporter.info("Confirmation skipped (--yes)");
        return Ok(true);
    }
    prompter.confirm(&format!(
        "Install {extension} for {}? This modifies system packages and PHP configuration.",
        runtime.label()
    ))
}
