//! Test fixtures for running the installer without touching a real system.
//!
//! - [`FakeHost`]: in-memory [`Host`] with scripted command output, failures
//!   and filesystem effects, recording every operation it performs
//! - [`ScriptedPrompter`]: answers prompts from a fixed list of lines
//! - [`RecordingReporter`]: captures everything the operator would see
//!
//! # Usage
//!
//! ```ignore
//! let host = FakeHost::new()
//!     .with_command("php8.3")
//!     .with_outputs("php8.3 -m", ["Core\n", "Core\noci8\n"])
//!     .with_dir_effect("unzip", ["/opt/oracle/instantclient_21_13"]);
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::error::{self, InstallerError, Result};
use crate::host::{CommandLine, Host};
use crate::operations::install::Stage;
use crate::prompt::{Prompter, is_affirmative, parse_menu_choice};
use crate::ui::Reporter;

/// One operation performed against a [`FakeHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    /// Read-only command whose stdout was captured
    Capture(String),
    /// Command run for its side effects
    Run(String),
    /// Filesystem mutation, rendered like the equivalent shell command
    Fs(String),
}

/// Filesystem change caused by running a command
#[derive(Debug, Clone)]
enum Effect {
    Dir(PathBuf),
    File(PathBuf),
}

#[derive(Debug, Default)]
struct FakeState {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    outputs: BTreeMap<String, VecDeque<String>>,
    ops: Vec<HostOp>,
    run_dirs: Vec<(String, Option<PathBuf>)>,
}

/// In-memory host
#[derive(Debug)]
pub struct FakeHost {
    privileged: bool,
    on_path: HashSet<String>,
    failures: Vec<String>,
    effects: Vec<(String, Effect)>,
    state: RefCell<FakeState>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// Privileged host with nothing installed
    pub fn new() -> Self {
        Self {
            privileged: true,
            on_path: HashSet::new(),
            failures: Vec::new(),
            effects: Vec::new(),
            state: RefCell::new(FakeState::default()),
        }
    }

    #[must_use]
    pub fn unprivileged(mut self) -> Self {
        self.privileged = false;
        self
    }

    /// Make a program resolvable on `PATH`
    #[must_use]
    pub fn with_command(mut self, program: &str) -> Self {
        self.on_path.insert(program.to_string());
        self
    }

    /// Fixed stdout for a rendered command line
    #[must_use]
    pub fn with_output(self, command: &str, stdout: &str) -> Self {
        self.with_outputs(command, [stdout])
    }

    /// Successive stdouts for a rendered command line; the last one repeats
    #[must_use]
    pub fn with_outputs<I, S>(self, command: &str, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.borrow_mut().outputs.insert(
            command.to_string(),
            outputs.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Commands whose rendered line starts with `prefix` fail
    #[must_use]
    pub fn with_failure(mut self, prefix: &str) -> Self {
        self.failures.push(prefix.to_string());
        self
    }

    /// Running a command starting with `prefix` creates `dirs` (with parents)
    #[must_use]
    pub fn with_dir_effect<I, P>(mut self, prefix: &str, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for dir in dirs {
            self.effects
                .push((prefix.to_string(), Effect::Dir(dir.into())));
        }
        self
    }

    /// Running a command starting with `prefix` creates empty `files`
    #[must_use]
    pub fn with_file_effect<I, P>(mut self, prefix: &str, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for file in files {
            self.effects
                .push((prefix.to_string(), Effect::File(file.into())));
        }
        self
    }

    /// Pre-existing directory (with parents)
    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.state.borrow_mut().add_dir(path.as_ref());
        self
    }

    /// Pre-existing file (with parent directories)
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.state.borrow_mut().add_file(path.as_ref(), contents);
        self
    }

    /// Every operation, in order
    pub fn ops(&self) -> Vec<HostOp> {
        self.state.borrow().ops.clone()
    }

    /// Captured and run commands, in order
    pub fn commands(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                HostOp::Capture(c) | HostOp::Run(c) => Some(c),
                HostOp::Fs(_) => None,
            })
            .collect()
    }

    /// Operations that change the host: run commands and filesystem writes
    pub fn mutations(&self) -> Vec<String> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                HostOp::Run(c) | HostOp::Fs(c) => Some(c),
                HostOp::Capture(_) => None,
            })
            .collect()
    }

    /// Working directory of the first run command starting with `prefix`
    pub fn run_dir(&self, prefix: &str) -> Option<Option<PathBuf>> {
        self.state
            .borrow()
            .run_dirs
            .iter()
            .find(|(c, _)| c.starts_with(prefix))
            .map(|(_, dir)| dir.clone())
    }

    /// Whether any run command starts with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.ops()
            .iter()
            .any(|op| matches!(op, HostOp::Run(c) if c.starts_with(prefix)))
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.borrow().files.get(path.as_ref()).cloned()
    }

    fn fail_for(&self, rendered: &str) -> Option<InstallerError> {
        self.failures
            .iter()
            .any(|prefix| rendered.starts_with(prefix.as_str()))
            .then(|| error::command::failed(rendered, "exit status: 1", "scripted failure"))
    }
}

impl FakeState {
    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn add_file(&mut self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
    }

    fn next_output(&mut self, rendered: &str) -> String {
        let Some(queue) = self.outputs.get_mut(rendered) else {
            return String::new();
        };
        if queue.len() > 1 {
            queue.pop_front().unwrap_or_default()
        } else {
            queue.front().cloned().unwrap_or_default()
        }
    }
}

impl Host for FakeHost {
    fn is_privileged(&self) -> bool {
        self.privileged
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.borrow();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.borrow().dirs.contains(path)
    }

    fn command_exists(&self, program: &str) -> bool {
        self.on_path.contains(program)
    }

    fn capture(&self, cmd: &CommandLine) -> Result<String> {
        let rendered = cmd.to_string();
        self.state
            .borrow_mut()
            .ops
            .push(HostOp::Capture(rendered.clone()));
        if let Some(err) = self.fail_for(&rendered) {
            return Err(err);
        }
        Ok(self.state.borrow_mut().next_output(&rendered))
    }

    fn run(&self, cmd: &CommandLine) -> Result<()> {
        let rendered = cmd.to_string();
        {
            let mut state = self.state.borrow_mut();
            state.ops.push(HostOp::Run(rendered.clone()));
            state.run_dirs.push((rendered.clone(), cmd.cwd.clone()));
        }
        if let Some(err) = self.fail_for(&rendered) {
            return Err(err);
        }

        let mut state = self.state.borrow_mut();
        for (prefix, effect) in &self.effects {
            if !rendered.starts_with(prefix.as_str()) {
                continue;
            }
            match effect {
                Effect::Dir(dir) => state.add_dir(dir),
                Effect::File(file) => state.add_file(file, ""),
            }
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state
            .ops
            .push(HostOp::Fs(format!("mkdir -p {}", path.display())));
        state.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state
            .ops
            .push(HostOp::Fs(format!("rm -rf {}", path.display())));
        state.dirs.retain(|d| !d.starts_with(path));
        state.files.retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.ops.push(HostOp::Fs(format!(
            "mv {} {}",
            from.display(),
            to.display()
        )));
        let contents = state.files.remove(from).unwrap_or_default();
        state.add_file(to, &contents);
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state
            .ops
            .push(HostOp::Fs(format!("write {}", path.display())));
        state.add_file(path, contents);
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.ops.push(HostOp::Fs(format!(
            "ln -s {} {}",
            target.display(),
            link.display()
        )));
        state.add_file(link, "");
        Ok(())
    }
}

/// Prompter answering from a fixed script of input lines
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Menus shown, in order
    pub menus: Vec<Vec<String>>,
    /// Answers rejected by the menu and re-prompted
    pub rejected: Vec<String>,
    /// Confirmation questions asked
    pub confirmations: usize,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    fn next_answer(&mut self) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| InstallerError::PromptFailed {
                message: "script exhausted".to_string(),
            })
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, _message: &str, items: &[String]) -> Result<usize> {
        self.menus.push(items.to_vec());
        loop {
            let answer = self.next_answer()?;
            if let Some(index) = parse_menu_choice(&answer, items.len()) {
                return Ok(index);
            }
            self.rejected.push(answer);
        }
    }

    fn confirm(&mut self, _message: &str) -> Result<bool> {
        self.confirmations += 1;
        Ok(is_affirmative(&self.next_answer()?))
    }
}

/// Something shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Stage(Stage),
    Info(String),
    Success(String),
    Skip(String),
    Warn(String),
}

/// Reporter recording every call
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub shown: Vec<Shown>,
}

impl RecordingReporter {
    /// Stages announced, in order
    pub fn stages(&self) -> Vec<Stage> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Stage(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    pub fn skips(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Skip(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Warn(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether any line contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.shown.iter().any(|s| match s {
            Shown::Stage(_) => false,
            Shown::Info(m) | Shown::Success(m) | Shown::Skip(m) | Shown::Warn(m) => {
                m.contains(needle)
            }
        })
    }
}

impl Reporter for RecordingReporter {
    fn stage(&mut self, stage: Stage) {
        self.shown.push(Shown::Stage(stage));
    }

    fn info(&mut self, message: &str) {
        self.shown.push(Shown::Info(message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.shown.push(Shown::Success(message.to_string()));
    }

    fn skip(&mut self, message: &str) {
        self.shown.push(Shown::Skip(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.shown.push(Shown::Warn(message.to_string()));
    }
}
