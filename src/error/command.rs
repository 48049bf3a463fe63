//! External command errors

use super::InstallerError;

/// Creates a command failed error
pub fn failed(
    command: impl Into<String>,
    status: impl Into<String>,
    output: impl Into<String>,
) -> InstallerError {
    InstallerError::CommandFailed {
        command: command.into(),
        status: status.into(),
        output: output.into(),
    }
}

/// Creates a command spawn failed error
pub fn spawn_failed(command: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::CommandSpawnFailed {
        command: command.into(),
        reason: reason.into(),
    }
}
