//! PHP runtime errors

use super::InstallerError;

/// Creates an unknown runtime error
pub fn unknown(version: impl Into<String>) -> InstallerError {
    InstallerError::UnknownRuntime {
        version: version.into(),
    }
}

/// Creates a runtime not installable error
pub fn not_installable(version: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::RuntimeNotInstallable {
        version: version.into(),
        reason: reason.into(),
    }
}
