//! Host implementation backed by the real operating system

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{self, Result};
use crate::ui;

use super::{CommandLine, Host};

/// Lines of command output kept in a failure report
const OUTPUT_TAIL_LINES: usize = 15;

/// Host that runs real commands and touches the real filesystem
#[derive(Debug, Default)]
pub struct SystemHost {
    /// Stream command output instead of capturing it behind a spinner
    verbose: bool,
}

impl SystemHost {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn command(cmd: &CommandLine) -> Command {
        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }
        for (key, value) in &cmd.envs {
            command.env(key, value);
        }
        command
    }

    fn output(cmd: &CommandLine) -> Result<Output> {
        tracing::debug!(command = %cmd, cwd = ?cmd.cwd, "running command");
        Self::command(cmd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| error::command::spawn_failed(cmd.to_string(), e.to_string()))
    }
}

impl Host for SystemHost {
    fn is_privileged(&self) -> bool {
        nix::unistd::Uid::effective().is_root()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn command_exists(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn capture(&self, cmd: &CommandLine) -> Result<String> {
        let output = Self::output(cmd)?;
        if !output.status.success() {
            return Err(error::command::failed(
                cmd.to_string(),
                output.status.to_string(),
                output_tail(&output),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, cmd: &CommandLine) -> Result<()> {
        if self.verbose {
            tracing::debug!(command = %cmd, cwd = ?cmd.cwd, "running command");
            let status = Self::command(cmd)
                .status()
                .map_err(|e| error::command::spawn_failed(cmd.to_string(), e.to_string()))?;
            if !status.success() {
                return Err(error::command::failed(
                    cmd.to_string(),
                    status.to_string(),
                    "see the command output above",
                ));
            }
            return Ok(());
        }

        let spinner = ui::command_spinner(&cmd.to_string());
        let result = Self::output(cmd);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let output = result?;
        if !output.status.success() {
            return Err(error::command::failed(
                cmd.to_string(),
                output.status.to_string(),
                output_tail(&output),
            ));
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(error::fs::remove_failed(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
            .map_err(|e| error::fs::write_failed(to.display().to_string(), e.to_string()))
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let write_err = |e: std::io::Error| {
            error::fs::write_failed(path.display().to_string(), e.to_string())
        };

        let parent = path.parent().unwrap_or_else(|| Path::new("/"));
        fs::create_dir_all(parent).map_err(write_err)?;

        // Stage next to the target so the final rename stays on one filesystem
        let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
        staged
            .write_all(contents.as_bytes())
            .map_err(write_err)?;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
        staged.persist(path).map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %path.display(), "wrote file");
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        // A dangling link reports as absent but still blocks creation
        if fs::symlink_metadata(link).is_ok() {
            fs::remove_file(link)
                .map_err(|e| error::fs::remove_failed(link.display().to_string(), e.to_string()))?;
        }
        std::os::unix::fs::symlink(target, link)
            .map_err(|e| error::fs::write_failed(link.display().to_string(), e.to_string()))
    }
}

/// Last lines of a failed command's output, stderr preferred
fn output_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };

    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}
