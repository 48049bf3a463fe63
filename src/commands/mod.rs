//! Command implementations for the oci8-installer CLI

pub mod completions;
pub mod install;
pub mod status;
pub mod version;
