//! Error types and handling for the OCI8 installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructors are grouped into sub-modules by error domain:
//! - [`command`]: External command failures
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//! - [`runtime`]: PHP runtime selection and detection errors

pub mod command;
pub mod config;
pub mod fs;
pub mod runtime;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Precondition errors
    #[error("This installer must be run with administrative privileges")]
    #[diagnostic(
        code(oci8_installer::precondition::not_privileged),
        help("Re-run the installer as root, e.g. with sudo")
    )]
    NotPrivileged,

    #[error("No supported PHP runtime found (checked: {checked})")]
    #[diagnostic(
        code(oci8_installer::precondition::no_runtime),
        help("Install one of the supported PHP versions before installing OCI8")
    )]
    NoRuntimeFound { checked: String },

    // Runtime selection errors
    #[error("PHP {version} is not a supported runtime")]
    #[diagnostic(code(oci8_installer::runtime::unknown))]
    UnknownRuntime { version: String },

    #[error("PHP {version} cannot be selected: {reason}")]
    #[diagnostic(code(oci8_installer::runtime::not_installable))]
    RuntimeNotInstallable { version: String, reason: String },

    // External command errors
    #[error("Command failed ({status}): {command}")]
    #[diagnostic(code(oci8_installer::command::failed))]
    CommandFailed {
        command: String,
        status: String,
        #[help]
        output: String,
    },

    #[error("Failed to start command: {command}: {reason}")]
    #[diagnostic(
        code(oci8_installer::command::spawn_failed),
        help("Check that the program is installed and on PATH")
    )]
    CommandSpawnFailed { command: String, reason: String },

    // Verification errors
    #[error("Oracle Instant Client at {path} is incomplete after extraction: missing {missing}")]
    #[diagnostic(
        code(oci8_installer::verify::client_incomplete),
        help("Remove the directory and the downloaded archives, then run the installer again")
    )]
    ClientVerificationFailed { path: String, missing: String },

    #[error("Extension '{extension}' is not loaded by PHP {version} after installation")]
    #[diagnostic(
        code(oci8_installer::verify::not_loaded),
        help("Check the module list of the selected PHP binary and its enabled ini files")
    )]
    ExtensionNotLoaded { extension: String, version: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(oci8_installer::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(oci8_installer::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(oci8_installer::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(oci8_installer::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(code(oci8_installer::fs::remove_failed))]
    FileRemoveFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(oci8_installer::fs::io_error))]
    IoError { message: String },

    // Interactive input errors
    #[error("Failed to read operator input: {message}")]
    #[diagnostic(code(oci8_installer::prompt::failed))]
    PromptFailed { message: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(oci8_installer::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },
}

impl From<std::io::Error> for InstallerError {
    fn from(err: std::io::Error) -> Self {
        fs::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for InstallerError {
    fn from(err: serde_json::Error) -> Self {
        InstallerError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

impl From<inquire::InquireError> for InstallerError {
    fn from(err: inquire::InquireError) -> Self {
        InstallerError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
