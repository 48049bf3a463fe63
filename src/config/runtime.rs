//! PHP runtime matrix
//!
//! Each supported PHP minor version maps to the names of its CLI binary,
//! build tools, FPM unit and development package. The default table covers
//! the Debian/Ubuntu `phpX.Y` packaging convention.

use serde::{Deserialize, Serialize};

/// PHP minor versions supported out of the box
pub const SUPPORTED_VERSIONS: [&str; 4] = ["8.1", "8.2", "8.3", "8.4"];

/// One row of the runtime matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhpRuntime {
    /// Minor version identifier, e.g. "8.3"
    pub version: String,

    /// CLI binary used for presence and module probes
    pub binary: String,

    /// Version-specific `phpize`
    pub phpize: String,

    /// Version-specific `php-config`
    pub php_config: String,

    /// systemd unit of the FPM service
    pub fpm_service: String,

    /// Package providing headers and build tools
    pub dev_package: String,

    /// Overrides the extension source version for this runtime only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_version: Option<String>,
}

impl PhpRuntime {
    /// Build a matrix row following the `phpX.Y` naming convention
    pub fn debian(version: &str) -> Self {
        Self {
            version: version.to_string(),
            binary: format!("php{version}"),
            phpize: format!("phpize{version}"),
            php_config: format!("php-config{version}"),
            fpm_service: format!("php{version}-fpm"),
            dev_package: format!("php{version}-dev"),
            extension_version: None,
        }
    }

    /// Display label used in menus and reports
    pub fn label(&self) -> String {
        format!("PHP {}", self.version)
    }
}

/// Default runtime matrix
pub fn default_runtimes() -> Vec<PhpRuntime> {
    SUPPORTED_VERSIONS
        .iter()
        .map(|v| PhpRuntime::debian(v))
        .collect()
}
