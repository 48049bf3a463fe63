//! Operator prompts
//!
//! The workflow asks two questions: which runtime to install for (a numbered,
//! 1-based menu) and whether to proceed (a single `y`/`n` answer). Both go
//! through the [`Prompter`] trait. On a terminal the questions are asked with
//! inquire; when stdin is piped they are read line by line.

use std::io::{BufRead, Write};

use inquire::{InquireError, Text};
use inquire::validator::Validation;

use crate::error::{InstallerError, Result};

/// Source of operator answers
pub trait Prompter {
    /// Pick one of `items`; returns the zero-based index
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize>;

    /// Ask a yes/no question; only an explicit affirmative returns `true`
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Parse a 1-based menu answer into a zero-based index
///
/// Only plain digits within `1..=len` are accepted.
pub fn parse_menu_choice(input: &str, len: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let choice: usize = trimmed.parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

/// Whether an answer is the one-character affirmative
pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

fn invalid_choice_message(len: usize) -> String {
    format!("Invalid selection, enter a number between 1 and {len}")
}

/// Interactive prompter for a terminal session
///
/// Esc at the menu asks again; Esc at the confirmation is a decline.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

/// Interpret one terminal menu answer; `None` means ask again
fn menu_answer(
    answer: std::result::Result<String, InquireError>,
    len: usize,
) -> Result<Option<usize>> {
    match answer {
        Ok(answer) => parse_menu_choice(&answer, len).map(Some).ok_or_else(|| {
            InstallerError::PromptFailed {
                message: format!("unexpected menu answer '{answer}'"),
            }
        }),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Interpret a terminal confirmation answer
fn confirm_answer(answer: std::result::Result<String, InquireError>) -> Result<bool> {
    match answer {
        Ok(answer) => Ok(is_affirmative(&answer)),
        Err(InquireError::OperationCanceled) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        println!("{message}");
        for (i, item) in items.iter().enumerate() {
            println!("  {}) {}", i + 1, item);
        }

        let len = items.len();
        loop {
            let answer = Text::new(&format!("Enter choice [1-{len}]:"))
                .with_validator(move |input: &str| {
                    Ok(if parse_menu_choice(input, len).is_some() {
                        Validation::Valid
                    } else {
                        Validation::Invalid(invalid_choice_message(len).into())
                    })
                })
                .prompt();

            if let Some(index) = menu_answer(answer, len)? {
                return Ok(index);
            }
            println!("{}", invalid_choice_message(len));
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        confirm_answer(Text::new(&format!("{message} [y/N]")).prompt())
    }
}

/// Line-based prompter over any reader and writer
///
/// Used when stdin is not a terminal, e.g. when answers are piped in.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line; `None` once input is exhausted
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        let len = items.len();
        writeln!(self.output, "{message}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, item)?;
        }

        loop {
            write!(self.output, "Enter choice [1-{len}]: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Err(InstallerError::PromptFailed {
                    message: "input closed before a runtime was selected".to_string(),
                });
            };

            if let Some(index) = parse_menu_choice(&line, len) {
                return Ok(index);
            }
            writeln!(self.output, "{}", invalid_choice_message(len))?;
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.output, "{message} [y/N]: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.is_some_and(|line| is_affirmative(&line)))
    }
}
