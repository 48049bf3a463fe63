//! Installer configuration
//!
//! Every parameter of an install run (runtime matrix, download URLs, install
//! paths, package list) has a compiled-in default. An optional YAML file can
//! override any section:
//!
//! ```yaml
//! oracle:
//!   install_dir: /opt/oracle
//! extension:
//!   version: "3.4.0"
//! ```

pub mod runtime;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

pub use runtime::PhpRuntime;

/// Full installer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Supported runtimes, probed in order
    pub runtimes: Vec<PhpRuntime>,

    /// Oracle Instant Client location and sources
    pub oracle: OracleSettings,

    /// Extension source and enablement
    pub extension: ExtensionSettings,

    /// OS packages and library paths
    pub system: SystemSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runtimes: runtime::default_runtimes(),
            oracle: OracleSettings::default(),
            extension: ExtensionSettings::default(),
            system: SystemSettings::default(),
        }
    }
}

/// Oracle Instant Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    /// Directory archives are downloaded to and extracted into
    pub install_dir: PathBuf,

    /// Name of the directory the archives extract to
    pub client_dir_name: String,

    /// Basic package archive URL
    pub basic_url: String,

    /// SDK package archive URL
    pub sdk_url: String,

    /// Shared library the extension links against
    pub library: String,

    /// Header required to build the extension
    pub header: String,

    /// Dynamic linker search path file
    pub ld_config: PathBuf,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("/opt/oracle"),
            client_dir_name: "instantclient_21_13".to_string(),
            basic_url: "https://download.oracle.com/otn_software/linux/instantclient/2113000/instantclient-basic-linux.x64-21.13.0.0.0dbru.zip".to_string(),
            sdk_url: "https://download.oracle.com/otn_software/linux/instantclient/2113000/instantclient-sdk-linux.x64-21.13.0.0.0dbru.zip".to_string(),
            library: "libclntsh.so".to_string(),
            header: "oci.h".to_string(),
            ld_config: PathBuf::from("/etc/ld.so.conf.d/oracle-instantclient.conf"),
        }
    }
}

impl OracleSettings {
    /// Extracted client directory
    pub fn client_dir(&self) -> PathBuf {
        self.install_dir.join(&self.client_dir_name)
    }

    /// SDK header directory inside the client
    pub fn sdk_include_dir(&self) -> PathBuf {
        self.client_dir().join("sdk").join("include")
    }

    pub fn library_path(&self) -> PathBuf {
        self.client_dir().join(&self.library)
    }

    pub fn header_path(&self) -> PathBuf {
        self.sdk_include_dir().join(&self.header)
    }

    /// Local path an archive URL is downloaded to
    pub fn archive_path(&self, url: &str) -> PathBuf {
        self.install_dir.join(file_name_from_url(url))
    }
}

/// Extension source and enablement settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionSettings {
    /// Module name as reported by `php -m`
    pub name: String,

    /// Source release built by default
    pub version: String,

    /// Source tarball URL; `{version}` is substituted
    pub url_template: String,

    /// Directory the tarball is downloaded to and unpacked in
    pub work_dir: PathBuf,

    /// Root of the per-version PHP configuration trees
    pub php_conf_root: PathBuf,

    /// Load priority written to the ini file
    pub priority: u8,

    /// Tool that registers a module as enabled
    pub enable_tool: String,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            name: "oci8".to_string(),
            version: "3.4.0".to_string(),
            url_template: "https://pecl.php.net/get/oci8-{version}.tgz".to_string(),
            work_dir: PathBuf::from("/opt/oracle"),
            php_conf_root: PathBuf::from("/etc/php"),
            priority: 20,
            enable_tool: "phpenmod".to_string(),
        }
    }
}

impl ExtensionSettings {
    /// Source release to build for a runtime
    pub fn version_for<'a>(&'a self, runtime: &'a PhpRuntime) -> &'a str {
        runtime
            .extension_version
            .as_deref()
            .unwrap_or(&self.version)
    }

    pub fn source_url(&self, version: &str) -> String {
        self.url_template.replace("{version}", version)
    }

    pub fn tarball_path(&self, version: &str) -> PathBuf {
        self.work_dir.join(file_name_from_url(&self.source_url(version)))
    }

    /// Directory the tarball unpacks to
    pub fn source_dir(&self, version: &str) -> PathBuf {
        self.work_dir.join(format!("{}-{}", self.name, version))
    }

    /// `mods-available` ini file for a runtime
    pub fn ini_path(&self, runtime: &PhpRuntime) -> PathBuf {
        self.php_conf_root
            .join(&runtime.version)
            .join("mods-available")
            .join(format!("{}.ini", self.name))
    }

    pub fn ini_contents(&self) -> String {
        format!(
            "; configuration for php {name} module\n; priority={priority}\nextension={name}.so\n",
            name = self.name,
            priority = self.priority
        )
    }
}

/// OS-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    /// Package manager binary (apt-get compatible)
    pub package_manager: String,

    /// Packages installed for every runtime; the runtime's dev package is added
    pub packages: Vec<String>,

    /// Legacy libaio soname the Instant Client loads
    pub libaio_legacy: PathBuf,

    /// Renamed libaio shipped by current packages
    pub libaio_current: PathBuf,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            package_manager: "apt-get".to_string(),
            packages: ["libaio1t64", "unzip", "wget", "build-essential"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            libaio_legacy: PathBuf::from("/usr/lib/x86_64-linux-gnu/libaio.so.1"),
            libaio_current: PathBuf::from("/usr/lib/x86_64-linux-gnu/libaio.so.1t64"),
        }
    }
}

impl SystemSettings {
    /// Package list for a runtime, in install order
    pub fn packages_for(&self, runtime: &PhpRuntime) -> Vec<String> {
        let mut packages = self.packages.clone();
        // headers go right after the archive tool, matching the documented order
        let at = packages.len().min(2);
        packages.insert(at, runtime.dev_package.clone());
        packages
    }
}

impl Settings {
    /// Parse settings from a YAML string; absent sections keep their defaults
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load settings, applying the override file when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;
        let settings = Self::from_yaml(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;
        settings.validate()?;

        tracing::debug!(path = %path.display(), "loaded configuration override");
        Ok(settings)
    }

    /// Reject settings the workflow cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.runtimes.is_empty() {
            return Err(error::config::invalid("at least one runtime is required"));
        }

        let mut seen = HashSet::new();
        for rt in &self.runtimes {
            if rt.version.trim().is_empty() || rt.binary.trim().is_empty() {
                return Err(error::config::invalid(
                    "runtime entries need a version and a binary",
                ));
            }
            if !seen.insert(rt.version.as_str()) {
                return Err(error::config::invalid(format!(
                    "runtime {} is listed twice",
                    rt.version
                )));
            }
        }

        for (field, url) in [
            ("oracle.basic_url", &self.oracle.basic_url),
            ("oracle.sdk_url", &self.oracle.sdk_url),
            ("extension.url_template", &self.extension.url_template),
        ] {
            if url.trim().is_empty() {
                return Err(error::config::invalid(format!("{field} must not be empty")));
            }
        }

        if self.extension.name.trim().is_empty() {
            return Err(error::config::invalid("extension.name must not be empty"));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn runtime(&self, version: &str) -> Option<&PhpRuntime> {
        self.runtimes.iter().find(|r| r.version == version)
    }
}

/// Last path segment of a URL, used as the download file name
fn file_name_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(without_query)
}
