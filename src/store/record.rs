//! Task record model and its line codec
//!
//! A record is one line of `tasks.txt`:
//!
//! ```text
//! alice, Write docs, Draft the user guide, 01 Oct 2026, 22 Dec 2026, No
//! ```
//!
//! Fields are separated by `", "` with no escaping, so a field containing
//! the separator cannot be stored.

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Field separator for both backing files
pub const FIELD_SEPARATOR: &str = ", ";

/// Textual date format, e.g. `22 Dec 2025`
pub const DATE_FORMAT: &str = "%d %b %Y";

const FIELD_COUNT: usize = 6;
const COMPLETED_YES: &str = "Yes";
const COMPLETED_NO: &str = "No";

/// One task as stored on disk
///
/// Dates are kept as the stored text so a rewrite reproduces the line exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub assignee: String,
    pub title: String,
    pub description: String,
    pub date_assigned: String,
    pub due_date: String,
    pub completed: bool,
}

impl Task {
    /// A fresh task: assigned `today`, not completed
    pub fn new(
        assignee: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            assignee: assignee.into(),
            title: title.into(),
            description: description.into(),
            date_assigned: format_date(today),
            due_date: due_date.into(),
            completed: false,
        }
    }

    /// Parse a single line (without its trailing newline)
    ///
    /// On failure returns the reason; callers attach path and line number.
    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line
            .trim_end_matches(['\r', '\n'])
            .split(FIELD_SEPARATOR)
            .collect();
        if fields.len() != FIELD_COUNT {
            return Err(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            ));
        }

        let completed = match fields[5] {
            COMPLETED_YES => true,
            COMPLETED_NO => false,
            other => return Err(format!("invalid completion flag '{}'", other)),
        };

        Ok(Self {
            assignee: fields[0].to_string(),
            title: fields[1].to_string(),
            description: fields[2].to_string(),
            date_assigned: fields[3].to_string(),
            due_date: fields[4].to_string(),
            completed,
        })
    }

    /// Serialize to a single line (without trailing newline)
    pub fn to_line(&self) -> String {
        [
            self.assignee.as_str(),
            self.title.as_str(),
            self.description.as_str(),
            self.date_assigned.as_str(),
            self.due_date.as_str(),
            self.completed_label(),
        ]
        .join(FIELD_SEPARATOR)
    }

    /// `Yes` or `No`, as stored
    pub fn completed_label(&self) -> &'static str {
        if self.completed {
            COMPLETED_YES
        } else {
            COMPLETED_NO
        }
    }

    pub fn due(&self) -> Result<NaiveDate> {
        parse_date(&self.due_date)
    }

    /// Incomplete and due strictly before `today`
    pub fn is_overdue(&self, today: NaiveDate) -> Result<bool> {
        if self.completed {
            return Ok(false);
        }
        Ok(self.due()? < today)
    }

    /// Multi-line display block used by the task views
    pub fn display_block(&self) -> String {
        format!(
            "Assigned to: {}\n\
             Task title: {}\n\
             Task description: {}\n\
             Date assigned: {}\n\
             Due date: {}\n\
             Task completed: {}\n",
            self.assignee,
            self.title,
            self.description,
            self.date_assigned,
            self.due_date,
            self.completed_label()
        )
    }
}

/// Parse a `DD Mon YYYY` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(text.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
