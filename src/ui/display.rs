//! Rendering of reports and run outcomes

use console::Style;

use crate::detection::RuntimeStatus;
use crate::error::Result;
use crate::operations::install::Outcome;
use crate::operations::status::StatusReport;
use crate::oracle::ClientState;

fn status_text(status: RuntimeStatus, extension: &str) -> String {
    match status {
        RuntimeStatus::Absent => Style::new().dim().apply_to("not installed").to_string(),
        RuntimeStatus::Missing => Style::new()
            .yellow()
            .apply_to(format!("{extension} not loaded"))
            .to_string(),
        RuntimeStatus::Loaded => Style::new()
            .green()
            .apply_to(format!("{extension} loaded"))
            .to_string(),
    }
}

/// Render the status report as human readable lines
pub fn status_lines(report: &StatusReport) -> Vec<String> {
    let bold = Style::new().bold();
    let mut lines = Vec::new();

    let client = match report.client {
        ClientState::Complete => Style::new().green().apply_to("complete".to_string()),
        ClientState::Incomplete(missing) => Style::new()
            .yellow()
            .apply_to(format!("incomplete ({missing} missing)")),
    };
    lines.push(format!(
        "{} {} {}",
        bold.apply_to("Oracle Instant Client:"),
        report.client_dir.display(),
        client
    ));
    lines.push(format!(
        "{} {} {}",
        bold.apply_to("Extension:"),
        report.extension,
        report.extension_version
    ));
    lines.push(bold.apply_to("PHP runtimes:").to_string());
    for found in &report.runtimes {
        lines.push(format!(
            "  {:<8} {}",
            found.runtime.label(),
            status_text(found.status, &report.extension)
        ));
    }
    lines
}

pub fn display_status(report: &StatusReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for line in status_lines(report) {
        println!("{line}");
    }
    Ok(())
}

/// Final line printed after an install run
pub fn outcome_line(outcome: &Outcome, extension: &str) -> String {
    match outcome {
        Outcome::Installed { runtime, .. } => format!(
            "{} {extension} installed for {}",
            Style::new().green().bold().apply_to("Done:"),
            runtime.label()
        ),
        Outcome::AlreadySatisfied(runtimes) => {
            let labels: Vec<String> = runtimes.iter().map(|r| r.label()).collect();
            format!(
                "{} {extension} already loaded for {}",
                Style::new().green().bold().apply_to("Nothing to do:"),
                labels.join(", ")
            )
        }
        Outcome::Declined => format!(
            "{} no changes were made",
            Style::new().yellow().bold().apply_to("Aborted:")
        ),
    }
}
