//! Status operation
//!
//! Read-only report of what an install run would find: the Oracle client
//! state and the extension status of every runtime in the matrix. Needs no
//! privileges and never changes the host.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::StatusArgs;
use crate::config::Settings;
use crate::detection::{self, DetectedRuntime};
use crate::error::Result;
use crate::host::Host;
use crate::oracle::{self, ClientState};

/// Options for the status report
#[derive(Debug, Clone, Default)]
pub struct StatusOptions {
    pub json: bool,
}

impl From<&StatusArgs> for StatusOptions {
    fn from(args: &StatusArgs) -> Self {
        Self { json: args.json }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub extension: String,
    pub extension_version: String,
    pub client_dir: PathBuf,
    pub client: ClientState,
    pub runtimes: Vec<DetectedRuntime>,
}

/// Probe the host
pub fn gather(settings: &Settings, host: &dyn Host) -> Result<StatusReport> {
    let client = oracle::probe(host, &settings.oracle)?;
    let detection = detection::detect(host, &settings.runtimes, &settings.extension.name)?;
    Ok(StatusReport {
        extension: settings.extension.name.clone(),
        extension_version: settings.extension.version.clone(),
        client_dir: settings.oracle.client_dir(),
        client,
        runtimes: detection.runtimes,
    })
}
