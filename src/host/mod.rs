//! Host capability
//!
//! Every probe and mutation the installer performs on the machine goes
//! through the [`Host`] trait. [`SystemHost`] talks to the real OS; tests use
//! an in-memory fake so the workflow can run without touching a system.

mod command;
mod system;

pub use command::CommandLine;
pub use system::SystemHost;

use std::path::Path;

use crate::error::Result;

/// Operations the installer needs from the machine it runs on
pub trait Host {
    /// Whether the current process has administrative rights
    fn is_privileged(&self) -> bool;

    /// Whether a path exists (symlinks are followed)
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Whether a program resolves on `PATH`
    fn command_exists(&self, program: &str) -> bool;

    /// Run a command to completion and return its stdout
    fn capture(&self, cmd: &CommandLine) -> Result<String>;

    /// Run a command to completion, failing on a non-zero exit
    fn run(&self, cmd: &CommandLine) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Remove a directory tree; a missing directory is not an error
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Move a file into place, replacing the destination
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    /// Replace a file's contents
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Create `link` pointing at `target`
    fn symlink(&self, target: &Path, link: &Path) -> Result<()>;
}
