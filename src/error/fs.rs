//! File system errors

use super::InstallerError;

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file remove failed error
pub fn remove_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::FileRemoveFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> InstallerError {
    InstallerError::IoError {
        message: message.into(),
    }
}
