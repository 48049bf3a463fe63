//! PHP runtime detection
//!
//! Each runtime in the matrix is probed for presence (its CLI binary resolves
//! on `PATH`) and, when present, for whether the extension already shows up
//! in `php -m`.

use serde::Serialize;

use crate::config::PhpRuntime;
use crate::error::Result;
use crate::host::{CommandLine, Host};

/// Detection result for a single runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeStatus {
    /// Binary not found
    Absent,
    /// Present, extension not loaded
    Missing,
    /// Present with the extension loaded
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedRuntime {
    pub runtime: PhpRuntime,
    pub status: RuntimeStatus,
}

/// Status of every runtime in the matrix, in matrix order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub runtimes: Vec<DetectedRuntime>,
}

impl Detection {
    fn with_status(&self, status: RuntimeStatus) -> Vec<&PhpRuntime> {
        self.runtimes
            .iter()
            .filter(|d| d.status == status)
            .map(|d| &d.runtime)
            .collect()
    }

    /// Present runtimes without the extension
    pub fn installable(&self) -> Vec<&PhpRuntime> {
        self.with_status(RuntimeStatus::Missing)
    }

    /// Present runtimes that already load the extension
    pub fn satisfied(&self) -> Vec<&PhpRuntime> {
        self.with_status(RuntimeStatus::Loaded)
    }

    pub fn any_present(&self) -> bool {
        self.runtimes
            .iter()
            .any(|d| d.status != RuntimeStatus::Absent)
    }

    pub fn status_of(&self, version: &str) -> Option<RuntimeStatus> {
        self.runtimes
            .iter()
            .find(|d| d.runtime.version == version)
            .map(|d| d.status)
    }
}

/// Whether `php -m` output lists the module
///
/// Matches whole lines case-insensitively; section headers such as
/// `[PHP Modules]` never match.
pub fn module_listed(modules_output: &str, module: &str) -> bool {
    modules_output
        .lines()
        .any(|line| line.trim().eq_ignore_ascii_case(module))
}

/// Whether a runtime reports the extension as loaded
pub fn extension_loaded(host: &dyn Host, runtime: &PhpRuntime, module: &str) -> Result<bool> {
    let output = host.capture(&CommandLine::new(&runtime.binary).arg("-m"))?;
    Ok(module_listed(&output, module))
}

/// Probe a single runtime
pub fn probe_runtime(host: &dyn Host, runtime: &PhpRuntime, module: &str) -> Result<RuntimeStatus> {
    if !host.command_exists(&runtime.binary) {
        return Ok(RuntimeStatus::Absent);
    }
    if extension_loaded(host, runtime, module)? {
        Ok(RuntimeStatus::Loaded)
    } else {
        Ok(RuntimeStatus::Missing)
    }
}

/// Probe every runtime in the matrix
pub fn detect(host: &dyn Host, runtimes: &[PhpRuntime], module: &str) -> Result<Detection> {
    let mut detected = Vec::with_capacity(runtimes.len());
    for runtime in runtimes {
        let status = probe_runtime(host, runtime, module)?;
        tracing::debug!(version = %runtime.version, ?status, "probed runtime");
        detected.push(DetectedRuntime {
            runtime: runtime.clone(),
            status,
        });
    }
    Ok(Detection { runtimes: detected })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::runtime::default_runtimes;
    use crate::test_fixtures::FakeHost;

    const MODULES_WITH_OCI8: &str = "[PHP Modules]\nCore\ndate\noci8\nPDO\n\n[Zend Modules]\n";
    const MODULES_WITHOUT_OCI8: &str = "[PHP Modules]\nCore\ndate\nPDO\n\n[Zend Modules]\n";

    #[test]
    fn test_module_listed() {
        assert!(module_listed(MODULES_WITH_OCI8, "oci8"));
        assert!(module_listed("OCI8\n", "oci8"));
        assert!(!module_listed(MODULES_WITHOUT_OCI8, "oci8"));
        assert!(!module_listed("pdo_oci8_extra\n", "oci8"));
    }

    #[test]
    fn test_classifies_each_version() {
        // 8.1 absent, 8.2 missing, 8.3 loaded, 8.4 missing
        let host = FakeHost::new()
            .with_command("php8.2")
            .with_output("php8.2 -m", MODULES_WITHOUT_OCI8)
            .with_command("php8.3")
            .with_output("php8.3 -m", MODULES_WITH_OCI8)
            .with_command("php8.4")
            .with_output("php8.4 -m", MODULES_WITHOUT_OCI8);

        let detection = detect(&host, &default_runtimes(), "oci8").unwrap();

        assert_eq!(detection.status_of("8.1"), Some(RuntimeStatus::Absent));
        assert_eq!(detection.status_of("8.2"), Some(RuntimeStatus::Missing));
        assert_eq!(detection.status_of("8.3"), Some(RuntimeStatus::Loaded));
        assert_eq!(detection.status_of("8.4"), Some(RuntimeStatus::Missing));

        let installable: Vec<&str> = detection
            .installable()
            .iter()
            .map(|r| r.version.as_str())
            .collect();
        let satisfied: Vec<&str> = detection
            .satisfied()
            .iter()
            .map(|r| r.version.as_str())
            .collect();
        assert_eq!(installable, vec!["8.2", "8.4"]);
        assert_eq!(satisfied, vec!["8.3"]);
        assert!(detection.any_present());
    }

    #[test]
    fn test_absent_runtime_is_not_queried() {
        let host = FakeHost::new();
        let detection = detect(&host, &default_runtimes(), "oci8").unwrap();

        assert!(!detection.any_present());
        assert!(detection.installable().is_empty());
        assert!(detection.satisfied().is_empty());
        assert!(host.commands().is_empty());
    }

    #[test]
    fn test_module_probe_failure_propagates() {
        let host = FakeHost::new()
            .with_command("php8.3")
            .with_failure("php8.3 -m");
        let runtimes = vec![PhpRuntime::debian("8.3")];
        assert!(detect(&host, &runtimes, "oci8").is_err());
    }
}
