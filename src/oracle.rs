//! Oracle Instant Client probing and provisioning

use std::fmt;

use serde::Serialize;

use crate::config::OracleSettings;
use crate::download;
use crate::error::{InstallerError, Result};
use crate::host::{CommandLine, Host};
use crate::ui::Reporter;

/// First check that failed while probing the client installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPiece {
    ClientDir,
    SdkIncludeDir,
    Library,
    Header,
    LdConfig,
    LinkerCacheEntry,
}

impl fmt::Display for MissingPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissingPiece::ClientDir => "client directory",
            MissingPiece::SdkIncludeDir => "sdk/include directory",
            MissingPiece::Library => "shared library",
            MissingPiece::Header => "SDK header",
            MissingPiece::LdConfig => "dynamic linker configuration",
            MissingPiece::LinkerCacheEntry => "linker cache entry",
        };
        f.write_str(text)
    }
}

/// Composite state of the client installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "missing", rename_all = "snake_case")]
pub enum ClientState {
    Complete,
    Incomplete(MissingPiece),
}

impl ClientState {
    pub fn is_complete(self) -> bool {
        self == ClientState::Complete
    }
}

/// Whether `ldconfig -p` output has an entry for the library
pub fn linker_cache_lists(cache_output: &str, library: &str) -> bool {
    cache_output
        .lines()
        .any(|line| line.trim_start().starts_with(library))
}

/// Check the extracted files only, in probe order
pub fn probe_files(host: &dyn Host, oracle: &OracleSettings) -> Option<MissingPiece> {
    if !host.is_dir(&oracle.client_dir()) {
        return Some(MissingPiece::ClientDir);
    }
    if !host.is_dir(&oracle.sdk_include_dir()) {
        return Some(MissingPiece::SdkIncludeDir);
    }
    if !host.exists(&oracle.library_path()) {
        return Some(MissingPiece::Library);
    }
    if !host.exists(&oracle.header_path()) {
        return Some(MissingPiece::Header);
    }
    None
}

/// Full completeness probe: files, linker config and linker cache
pub fn probe(host: &dyn Host, oracle: &OracleSettings) -> Result<ClientState> {
    if let Some(missing) = probe_files(host, oracle) {
        return Ok(ClientState::Incomplete(missing));
    }
    if !host.exists(&oracle.ld_config) {
        return Ok(ClientState::Incomplete(MissingPiece::LdConfig));
    }

    let cache = host.capture(&CommandLine::new("ldconfig").arg("-p"))?;
    if !linker_cache_lists(&cache, &oracle.library) {
        return Ok(ClientState::Incomplete(MissingPiece::LinkerCacheEntry));
    }
    Ok(ClientState::Complete)
}

/// Download, extract and register the client
///
/// Each sub-step is skipped when its result is already on disk. An existing
/// but incomplete extraction is removed and extracted again.
pub fn provision(host: &dyn Host, oracle: &OracleSettings, reporter: &mut dyn Reporter) -> Result<()> {
    host.create_dir_all(&oracle.install_dir)?;

    let archives = [
        oracle.archive_path(&oracle.basic_url),
        oracle.archive_path(&oracle.sdk_url),
    ];
    download::fetch_if_missing(host, &oracle.basic_url, &archives[0], reporter)?;
    download::fetch_if_missing(host, &oracle.sdk_url, &archives[1], reporter)?;

    let client_dir = oracle.client_dir();
    if host.exists(&client_dir) {
        if let Some(missing) = probe_files(host, oracle) {
            reporter.warn(&format!(
                "{} is incomplete (missing {missing}), extracting again",
                client_dir.display()
            ));
            host.remove_dir_all(&client_dir)?;
        }
    }

    if host.exists(&client_dir) {
        reporter.skip(&format!("{} already extracted", client_dir.display()));
    } else {
        for archive in &archives {
            host.run(
                &CommandLine::new("unzip")
                    .args(["-q", "-o"])
                    .arg(archive.display().to_string())
                    .arg("-d")
                    .arg(oracle.install_dir.display().to_string()),
            )?;
        }
        reporter.success(&format!("Extracted to {}", client_dir.display()));
    }

    if let Some(missing) = probe_files(host, oracle) {
        return Err(InstallerError::ClientVerificationFailed {
            path: client_dir.display().to_string(),
            missing: missing.to_string(),
        });
    }

    host.write_file(&oracle.ld_config, &format!("{}\n", client_dir.display()))?;
    host.run(&CommandLine::new("ldconfig"))?;
    reporter.success(&format!(
        "Registered {} with the dynamic linker",
        client_dir.display()
    ));
    Ok(())
}
