//! OCI8 extension source acquisition, build, and enablement

use std::path::Path;

use crate::config::{ExtensionSettings, PhpRuntime};
use crate::download;
use crate::error::Result;
use crate::host::{CommandLine, Host};
use crate::ui::Reporter;

/// Parallel jobs for `make`
pub fn build_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Download the source tarball if needed and unpack a fresh source tree
///
/// The tarball is only fetched once, but the source directory is always
/// replaced so every build starts from pristine sources.
pub fn acquire(
    host: &dyn Host,
    extension: &ExtensionSettings,
    version: &str,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    host.create_dir_all(&extension.work_dir)?;

    let tarball = extension.tarball_path(version);
    download::fetch_if_missing(host, &extension.source_url(version), &tarball, reporter)?;

    let source_dir = extension.source_dir(version);
    host.remove_dir_all(&source_dir)?;
    host.run(
        &CommandLine::new("tar")
            .arg("-xzf")
            .arg(tarball.display().to_string())
            .arg("-C")
            .arg(extension.work_dir.display().to_string()),
    )?;
    reporter.success(&format!("Unpacked sources to {}", source_dir.display()));
    Ok(())
}

/// Run a step whose failure does not matter
fn best_effort(host: &dyn Host, cmd: &CommandLine) {
    if let Err(e) = host.run(cmd) {
        tracing::debug!(command = %cmd, error = %e, "ignoring failed clean step");
    }
}

/// Compile, install and enable the extension for one runtime
pub fn build_and_install(
    host: &dyn Host,
    extension: &ExtensionSettings,
    runtime: &PhpRuntime,
    client_dir: &Path,
    jobs: usize,
    reporter: &mut dyn Reporter,
) -> Result<()> {
    let version = extension.version_for(runtime);
    let source_dir = extension.source_dir(version);
    let in_source = |program: &str| CommandLine::new(program).current_dir(&source_dir);

    best_effort(host, &in_source(&runtime.phpize).arg("--clean"));
    best_effort(host, &in_source("make").arg("clean"));

    host.run(&in_source(&runtime.phpize))?;
    host.run(
        &in_source("./configure")
            .arg(format!(
                "--with-{}=instantclient,{}",
                extension.name,
                client_dir.display()
            ))
            .arg(format!("--with-php-config={}", runtime.php_config)),
    )?;
    host.run(&in_source("make").arg(format!("-j{jobs}")))?;
    host.run(&in_source("make").arg("install"))?;
    reporter.success(&format!(
        "Built and installed {} {version} for {}",
        extension.name,
        runtime.label()
    ));

    let ini = extension.ini_path(runtime);
    host.write_file(&ini, &extension.ini_contents())?;
    host.run(
        &CommandLine::new(&extension.enable_tool)
            .args(["-v", runtime.version.as_str(), extension.name.as_str()]),
    )?;
    reporter.success(&format!(
        "Enabled {} via {}",
        extension.name,
        ini.display()
    ));
    Ok(())
}

/// Remove the unpacked source tree
pub fn cleanup(host: &dyn Host, extension: &ExtensionSettings, version: &str) -> Result<()> {
    let source_dir = extension.source_dir(version);
    host.remove_dir_all(&source_dir)?;
    tracing::debug!(path = %source_dir.display(), "removed extension sources");
    Ok(())
}
