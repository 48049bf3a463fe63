//! Workflow stages in execution order

use std::fmt;

/// One stage of an install run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    PrivilegeCheck,
    ClientProbe,
    RuntimeDetection,
    EarlyExit,
    Selection,
    Confirmation,
    Dependencies,
    CompatSymlink,
    ClientProvisioning,
    ExtensionSource,
    Build,
    ServiceRestart,
    Cleanup,
    Verification,
    Summary,
}

impl Stage {
    pub const ALL: [Stage; 15] = [
        Stage::PrivilegeCheck,
        Stage::ClientProbe,
        Stage::RuntimeDetection,
        Stage::EarlyExit,
        Stage::Selection,
        Stage::Confirmation,
        Stage::Dependencies,
        Stage::CompatSymlink,
        Stage::ClientProvisioning,
        Stage::ExtensionSource,
        Stage::Build,
        Stage::ServiceRestart,
        Stage::Cleanup,
        Stage::Verification,
        Stage::Summary,
    ];

    /// 1-based position in the run
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::PrivilegeCheck => "Checking privileges",
            Stage::ClientProbe => "Inspecting Oracle Instant Client",
            Stage::RuntimeDetection => "Detecting PHP runtimes",
            Stage::EarlyExit => "Evaluating detected runtimes",
            Stage::Selection => "Selecting PHP runtime",
            Stage::Confirmation => "Confirming installation",
            Stage::Dependencies => "Installing system packages",
            Stage::CompatSymlink => "Checking libaio compatibility link",
            Stage::ClientProvisioning => "Provisioning Oracle Instant Client",
            Stage::ExtensionSource => "Fetching extension source",
            Stage::Build => "Building and enabling extension",
            Stage::ServiceRestart => "Restarting PHP-FPM",
            Stage::Cleanup => "Cleaning up",
            Stage::Verification => "Verifying installation",
            Stage::Summary => "Summary",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {}",
            self.number(),
            Stage::ALL.len(),
            self.title()
        )
    }
}
