//! Task and user summary reports
//!
//! Reports are computed fresh from the full task set and written to
//! `task_overview.txt` and `user_overview.txt`, replacing any previous
//! content.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;

use crate::config::DataPaths;
use crate::error::{Error, Result};
use crate::store::{CredentialStore, Task, TaskStore};

/// Aggregate statistics over every task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_users: usize,
    pub total_tasks: usize,
    pub completed: usize,
    pub incomplete: usize,
    pub overdue: usize,
    pub incomplete_percent: f64,
    pub overdue_percent: f64,
    pub users: Vec<UserReport>,
}

/// Statistics for one registered user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub username: String,
    pub assigned: usize,
    /// Share of all tasks
    pub assigned_percent: f64,
    /// The following are shares of this user's own tasks
    pub completed_percent: f64,
    pub incomplete_percent: f64,
    pub overdue_percent: f64,
}

/// Result of [`generate`]
#[derive(Debug)]
pub enum GenerateOutcome {
    Written(Report),
    /// The credential or task file is missing; nothing was written
    MissingFiles,
}

/// Both summary documents as read back from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summaries {
    pub task_overview: String,
    pub user_overview: String,
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Default)]
struct Counts {
    total: usize,
    completed: usize,
    incomplete: usize,
    overdue: usize,
}

impl Counts {
    fn add(&mut self, task: &Task, today: NaiveDate) -> Result<()> {
        self.total += 1;
        if task.completed {
            self.completed += 1;
        } else {
            self.incomplete += 1;
            if task.is_overdue(today)? {
                self.overdue += 1;
            }
        }
        Ok(())
    }
}

impl Report {
    /// Compute the report for `usernames` (in order) over `tasks`
    ///
    /// Fails if an incomplete task carries an unparseable due date.
    pub fn compute<'a, I>(usernames: I, tasks: &[Task], today: NaiveDate) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut totals = Counts::default();
        for task in tasks {
            totals.add(task, today)?;
        }

        let mut users = Vec::new();
        for username in usernames {
            let mut counts = Counts::default();
            for task in tasks.iter().filter(|t| t.assignee == username) {
                counts.add(task, today)?;
            }
            users.push(UserReport {
                username: username.to_string(),
                assigned: counts.total,
                assigned_percent: percent(counts.total, totals.total),
                completed_percent: percent(counts.completed, counts.total),
                incomplete_percent: percent(counts.incomplete, counts.total),
                overdue_percent: percent(counts.overdue, counts.total),
            });
        }

        Ok(Self {
            total_users: users.len(),
            total_tasks: totals.total,
            completed: totals.completed,
            incomplete: totals.incomplete,
            overdue: totals.overdue,
            incomplete_percent: percent(totals.incomplete, totals.total),
            overdue_percent: percent(totals.overdue, totals.total),
            users,
        })
    }

    /// Text of `task_overview.txt`
    pub fn render_task_overview(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total tasks: {}\n", self.total_tasks));
        out.push_str(&format!("Completed tasks: {}\n", self.completed));
        out.push_str(&format!("Incomplete tasks: {}\n", self.incomplete));
        out.push_str(&format!("Overdue tasks: {}\n", self.overdue));
        out.push_str(&format!(
            "Share of incomplete tasks: {:.2}%\n",
            self.incomplete_percent
        ));
        out.push_str(&format!(
            "Share of overdue tasks: {:.2}%\n",
            self.overdue_percent
        ));
        out
    }

    /// Text of `user_overview.txt`
    pub fn render_user_overview(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total users: {}\n", self.total_users));
        out.push_str(&format!("Total tasks: {}\n", self.total_tasks));

        for user in &self.users {
            out.push_str(&format!("\nUser: {}\n", user.username));
            out.push_str(&format!("Number of tasks assigned: {}\n", user.assigned));
            out.push_str(&format!(
                "Share of tasks assigned: {:.2}%\n",
                user.assigned_percent
            ));
            out.push_str(&format!(
                "Share of completed tasks: {:.2}%\n",
                user.completed_percent
            ));
            out.push_str(&format!(
                "Share of incomplete tasks: {:.2}%\n",
                user.incomplete_percent
            ));
            out.push_str(&format!(
                "Share of overdue tasks: {:.2}%\n",
                user.overdue_percent
            ));
        }
        out
    }

    pub fn user(&self, username: &str) -> Option<&UserReport> {
        self.users.iter().find(|u| u.username == username)
    }
}

/// Compute the report from the data files and write both summaries
pub fn generate(paths: &DataPaths, today: NaiveDate) -> Result<GenerateOutcome> {
    let credentials = CredentialStore::load(paths.users_file())?;
    let store = TaskStore::new(paths.tasks_file());

    if !credentials.found() {
        return Ok(GenerateOutcome::MissingFiles);
    }
    let Some(tasks) = store.load()? else {
        return Ok(GenerateOutcome::MissingFiles);
    };

    let report = Report::compute(credentials.usernames(), &tasks, today)?;

    let task_overview = paths.task_overview_file();
    fs::write(&task_overview, report.render_task_overview())
        .map_err(|e| Error::io(&task_overview, e))?;

    let user_overview = paths.user_overview_file();
    fs::write(&user_overview, report.render_user_overview())
        .map_err(|e| Error::io(&user_overview, e))?;

    tracing::info!(
        tasks = report.total_tasks,
        users = report.total_users,
        "generated reports"
    );

    Ok(GenerateOutcome::Written(report))
}

/// Read both summaries, or `None` if either is missing
pub fn read_summaries(paths: &DataPaths) -> Result<Option<Summaries>> {
    let read = |path: std::path::PathBuf| match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&path, e)),
    };

    let task_overview = read(paths.task_overview_file())?;
    let user_overview = read(paths.user_overview_file())?;

    Ok(match (task_overview, user_overview) {
        (Some(task_overview), Some(user_overview)) => Some(Summaries {
            task_overview,
            user_overview,
        }),
        _ => None,
    })
}

/// Read both summaries, generating them first if either is missing
///
/// Returns `None` when generation was impossible because data files are
/// missing.
pub fn display(paths: &DataPaths, today: NaiveDate) -> Result<Option<Summaries>> {
    if let Some(summaries) = read_summaries(paths)? {
        return Ok(Some(summaries));
    }

    match generate(paths, today)? {
        GenerateOutcome::Written(_) => read_summaries(paths),
        GenerateOutcome::MissingFiles => Ok(None),
    }
}
