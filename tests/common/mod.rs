//! Common test utilities for oci8-installer integration tests
//!
//! Tests never run against the real runtime matrix. Each one writes a config
//! file whose runtime binary cannot exist and whose Oracle paths live in a
//! temporary directory, so no test can change the machine it runs on.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Binary name no host will ever have on `PATH`
pub const MISSING_PHP: &str = "oci8-installer-test-php-missing";

/// A temporary directory holding a config override
pub struct TestConfig {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    /// Config with one runtime whose binary does not exist
    pub fn absent_runtime() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().display().to_string();
        let yaml = format!(
            "runtimes:\n  \
               - version: \"8.3\"\n    \
                 binary: {MISSING_PHP}\n    \
                 phpize: phpize8.3\n    \
                 php_config: php-config8.3\n    \
                 fpm_service: php8.3-fpm\n    \
                 dev_package: php8.3-dev\n\
             oracle:\n  \
               install_dir: {root}/oracle\n  \
               ld_config: {root}/oracle-instantclient.conf\n\
             extension:\n  \
               work_dir: {root}/work\n  \
               php_conf_root: {root}/php\n"
        );
        Self::with_yaml(temp, &yaml)
    }

    /// Config with arbitrary contents
    pub fn raw(yaml: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        Self::with_yaml(temp, yaml)
    }

    fn with_yaml(temp: TempDir, yaml: &str) -> Self {
        let path = temp.path().join("oci8-installer.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        Self { temp, path }
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }
}

/// Command for the installer binary with a clean environment
#[allow(deprecated)]
pub fn installer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("oci8-installer").expect("Failed to find binary");
    cmd.env_remove("OCI8_INSTALLER_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}
