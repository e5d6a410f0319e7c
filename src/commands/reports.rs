//! Report commands: generate reports, display statistics, and the
//! non-interactive `report` subcommand

use anyhow::{Context, Result};
use chrono::Local;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;
use task_manager::config::DataPaths;
use task_manager::report::{self, GenerateOutcome, Summaries};

const MISSING_FILES: &str = "Files were not found and reports cannot be generated.\n";

/// Output format for the `report` subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// The two plain-text summary documents
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "md" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

fn render_summaries(summaries: &Summaries) -> String {
    format!(
        "--------- TASK OVERVIEW ---------\n\n{}\n\n--------- USER OVERVIEW ---------\n\n{}",
        summaries.task_overview, summaries.user_overview
    )
}

/// `gr`: regenerate both summary files
pub fn generate<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
) -> Result<()> {
    match report::generate(&session.paths, session.today()).context("Failed to generate reports")? {
        GenerateOutcome::Written(_) => {
            console.say(format!("{}\n", "Reports were generated successfully!".green()))?;
        }
        GenerateOutcome::MissingFiles => console.say(MISSING_FILES)?,
    }
    Ok(())
}

/// `ds`: print both summaries, generating them first if needed
pub fn display<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
) -> Result<()> {
    match report::display(&session.paths, session.today()).context("Failed to display statistics")? {
        Some(summaries) => console.say(render_summaries(&summaries))?,
        None => console.say(MISSING_FILES)?,
    }
    Ok(())
}

/// Regenerate the reports and return them in the requested format
pub fn execute(paths: &DataPaths, format: ReportFormat) -> Result<String> {
    let today = Local::now().date_naive();

    let report = match report::generate(paths, today).context("Failed to generate reports")? {
        GenerateOutcome::Written(report) => report,
        GenerateOutcome::MissingFiles => anyhow::bail!(
            "Both {} and {} are required to generate reports",
            paths.users_file().display(),
            paths.tasks_file().display()
        ),
    };

    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        ReportFormat::Text => Ok(render_summaries(&Summaries {
            task_overview: report.render_task_overview(),
            user_overview: report.render_user_overview(),
        })),
    }
}
