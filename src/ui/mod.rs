//! Operator-facing output
//!
//! This module handles:
//! - Stage headers and status lines for the install workflow
//! - Spinners for long-running external commands using indicatif
//!
//! All workflow output goes through the [`Reporter`] trait so tests can record
//! what the operator would have seen.

pub mod display;

use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::operations::install::Stage;

/// Reporter for workflow progress
pub trait Reporter {
    /// Announce the start of a stage
    fn stage(&mut self, stage: Stage);

    /// Neutral progress line
    fn info(&mut self, message: &str);

    /// A step finished successfully
    fn success(&mut self, message: &str);

    /// A step was skipped because its work is already done
    fn skip(&mut self, message: &str);

    /// Non-fatal problem
    fn warn(&mut self, message: &str);
}

/// Reporter writing styled lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn stage(&mut self, stage: Stage) {
        tracing::debug!(stage = ?stage, "entering stage");
        println!("\n{}", style(stage).cyan().bold());
    }

    fn info(&mut self, message: &str) {
        println!("  {message}");
    }

    fn success(&mut self, message: &str) {
        println!("  {} {}", style("✓").green().bold(), message);
    }

    fn skip(&mut self, message: &str) {
        println!("  {} {}", style("-").dim(), style(message).dim());
    }

    fn warn(&mut self, message: &str) {
        println!("  {} {}", style("!").yellow().bold(), style(message).yellow());
    }
}

/// Spinner shown while an external command runs
///
/// Returns `None` when stderr is not a terminal, so piped and logged runs
/// stay free of control sequences.
pub fn command_spinner(message: &str) -> Option<ProgressBar> {
    if !Term::stderr().is_term() {
        return None;
    }

    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}
