//! Install operation
//!
//! Drives one linear pass of the installer workflow: verify privileges, probe
//! the Oracle client and the PHP runtimes, pick a runtime, then install
//! packages, provision the client, build and enable the extension, and verify
//! the result. Each mutating stage first checks whether its work is already
//! done. The first error stops the run; nothing is rolled back.

pub mod execution;
pub mod selection;
pub mod stage;


pub use stage::Stage;

use crate::cli::InstallArgs;
use crate::config::{PhpRuntime, Settings};
use crate::detection::{self, Detection, RuntimeStatus};
use crate::error::{InstallerError, Result};
use crate::extension;
use crate::host::Host;
use crate::oracle::{self, ClientState};
use crate::prompt::Prompter;
use crate::ui::Reporter;

/// Options for installation
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Answer the confirmation gate affirmatively
    pub assume_yes: bool,
    /// Runtime version chosen up front instead of through the menu
    pub runtime: Option<String>,
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            assume_yes: args.yes,
            runtime: args.php.clone(),
        }
    }
}

/// How an install run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Extension installed and loaded for `runtime`
    Installed {
        runtime: PhpRuntime,
        /// Other runtimes that already had the extension
        satisfied: Vec<PhpRuntime>,
    },
    /// Every present runtime already loads the extension
    AlreadySatisfied(Vec<PhpRuntime>),
    /// Operator declined at the confirmation gate
    Declined,
}

/// Installer workflow over an injected host, prompter and reporter
pub struct InstallOperation<'a> {
    settings: &'a Settings,
    host: &'a dyn Host,
    prompter: &'a mut dyn Prompter,
    reporter: &'a mut dyn Reporter,
    options: InstallOptions,
    jobs: usize,
}

impl<'a> InstallOperation<'a> {
    pub fn new(
        settings: &'a Settings,
        host: &'a dyn Host,
        prompter: &'a mut dyn Prompter,
        reporter: &'a mut dyn Reporter,
        options: InstallOptions,
    ) -> Self {
        Self {
            settings,
            host,
            prompter,
            reporter,
            options,
            jobs: extension::build_jobs(),
        }
    }

    #[cfg(test)]
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Run the workflow
    pub fn execute(&mut self) -> Result<Outcome> {
        self.check_privileges()?;
        let client = self.probe_client()?;
        let detection = self.detect_runtimes()?;

        self.reporter.stage(Stage::EarlyExit);
        if !detection.any_present() {
            return Err(InstallerError::NoRuntimeFound {
                checked: self
                    .settings
                    .runtimes
                    .iter()
                    .map(|r| r.binary.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        let satisfied: Vec<PhpRuntime> = detection.satisfied().into_iter().cloned().collect();
        if detection.installable().is_empty() {
            self.reporter.success(&format!(
                "{} is already loaded for every installed PHP runtime",
                self.settings.extension.name
            ));
            return Ok(Outcome::AlreadySatisfied(satisfied));
        }
        self.reporter.info(&format!(
            "{} runtime(s) can receive {}",
            detection.installable().len(),
            self.settings.extension.name
        ));

        self.reporter.stage(Stage::Selection);
        let runtime = selection::choose(
            &detection,
            self.options.runtime.as_deref(),
            &mut *self.prompter,
            &mut *self.reporter,
        )?
        .clone();

        self.reporter.stage(Stage::Confirmation);
        let proceed = selection::confirm(
            &runtime,
            &self.settings.extension.name,
            self.options.assume_yes,
            &mut *self.prompter,
            &mut *self.reporter,
        )?;
        if !proceed {
            self.reporter.info("Aborted, nothing was changed");
            return Ok(Outcome::Declined);
        }

        self.apply(&runtime, client)?;
        self.verify(&runtime)?;

        self.reporter.stage(Stage::Summary);
        self.reporter.success(&format!(
            "{} is installed and loaded for {}",
            self.settings.extension.name,
            runtime.label()
        ));
        for other in &satisfied {
            self.reporter.info(&format!(
                "{} already had {} loaded",
                other.label(),
                self.settings.extension.name
            ));
        }
        Ok(Outcome::Installed { runtime, satisfied })
    }

    fn check_privileges(&mut self) -> Result<()> {
        self.reporter.stage(Stage::PrivilegeCheck);
        if !self.host.is_privileged() {
            return Err(InstallerError::NotPrivileged);
        }
        self.reporter.success("Running with administrative privileges");
        Ok(())
    }

    fn probe_client(&mut self) -> Result<ClientState> {
        self.reporter.stage(Stage::ClientProbe);
        let state = oracle::probe(self.host, &self.settings.oracle)?;
        let dir = self.settings.oracle.client_dir();
        match state {
            ClientState::Complete => self.reporter.success(&format!(
                "Oracle Instant Client is set up at {}",
                dir.display()
            )),
            ClientState::Incomplete(missing) => self.reporter.info(&format!(
                "Oracle Instant Client needs setup ({missing} missing)"
            )),
        }
        Ok(state)
    }

    fn detect_runtimes(&mut self) -> Result<Detection> {
        self.reporter.stage(Stage::RuntimeDetection);
        let detection = detection::detect(
            self.host,
            &self.settings.runtimes,
            &self.settings.extension.name,
        )?;
        for found in &detection.runtimes {
            let label = found.runtime.label();
            match found.status {
                RuntimeStatus::Absent => self.reporter.skip(&format!("{label} not installed")),
                RuntimeStatus::Missing => self.reporter.info(&format!(
                    "{label} found, {} not loaded",
                    self.settings.extension.name
                )),
                RuntimeStatus::Loaded => self.reporter.success(&format!(
                    "{label} found, {} already loaded",
                    self.settings.extension.name
                )),
            }
        }
        Ok(detection)
    }

    /// Stages that change the host
    fn apply(&mut self, runtime: &PhpRuntime, client: ClientState) -> Result<()> {
        let host = self.host;
        let settings = self.settings;
        let version = settings.extension.version_for(runtime);

        self.reporter.stage(Stage::Dependencies);
        execution::install_dependencies(host, &settings.system, runtime, &mut *self.reporter)?;

        self.reporter.stage(Stage::CompatSymlink);
        execution::ensure_libaio_link(host, &settings.system, &mut *self.reporter)?;

        self.reporter.stage(Stage::ClientProvisioning);
        if client.is_complete() {
            self.reporter
                .skip("Oracle Instant Client already set up, skipping download");
        } else {
            oracle::provision(host, &settings.oracle, &mut *self.reporter)?;
        }

        self.reporter.stage(Stage::ExtensionSource);
        extension::acquire(host, &settings.extension, version, &mut *self.reporter)?;

        self.reporter.stage(Stage::Build);
        extension::build_and_install(
            host,
            &settings.extension,
            runtime,
            &settings.oracle.client_dir(),
            self.jobs,
            &mut *self.reporter,
        )?;

        self.reporter.stage(Stage::ServiceRestart);
        execution::restart_fpm(host, runtime, &mut *self.reporter);

        self.reporter.stage(Stage::Cleanup);
        extension::cleanup(host, &settings.extension, version)?;
        self.reporter.success("Removed extension build directory");
        Ok(())
    }

    fn verify(&mut self, runtime: &PhpRuntime) -> Result<()> {
        self.reporter.stage(Stage::Verification);
        let name = &self.settings.extension.name;
        if !detection::extension_loaded(self.host, runtime, name)? {
            return Err(InstallerError::ExtensionNotLoaded {
                extension: name.clone(),
                version: runtime.version.clone(),
            });
        }
        self.reporter
            .success(&format!("{} -m lists {name}", runtime.binary));
        Ok(())
    }
}
