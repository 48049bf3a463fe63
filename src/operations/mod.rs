//! Operations module
//!
//! High-level operations behind the CLI commands:
//! - InstallOperation: the installer workflow
//! - status: read-only report of runtime and Oracle client state
//!
//! Operations talk to the machine only through the `Host` capability and to
//! the operator through the `Prompter` and `Reporter` traits.

pub mod install;
pub mod status;
