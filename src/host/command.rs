//! External command description

use std::fmt;
use std::path::PathBuf;

/// A program invocation, built up before it is handed to a [`super::Host`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_args_with_spaces() {
        let cmd = CommandLine::new("echo").args(["a", "b c", ""]);
        assert_eq!(cmd.to_string(), "echo a 'b c' ''");
    }

    #[test]
    fn test_builder_collects_cwd_and_env() {
        let cmd = CommandLine::new("make")
            .current_dir("/opt/oracle/oci8-3.4.0")
            .env("LC_ALL", "C");
        assert_eq!(cmd.cwd, Some(PathBuf::from("/opt/oracle/oci8-3.4.0")));
        assert_eq!(cmd.envs, vec![("LC_ALL".to_string(), "C".to_string())]);
        assert_eq!(cmd.to_string(), "make");
    }
}
