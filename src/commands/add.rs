//! Add task command

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;
use task_manager::store::{parse_date, Task};

pub(crate) const DATE_RETRY: &str = "Invalid date format. Please use e.g. 22 Dec 2025.\n";

/// Prompt for a new task and append it to the task file
pub fn execute<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &Session) -> Result<()> {
    let credentials = &session.credentials;
    let assignee = console.ask_until(
        "Enter the username the task is assigned to: ",
        "User does not exist. Please enter a valid username.\n",
        |name| credentials.contains(name).then(|| name.to_string()),
    )?;

    let title = console.ask("Enter the title of the task: ")?;
    let description = console.ask("Enter the task description: ")?;

    let due_date = console.ask_until(
        "Enter the due date of the task (e.g. 22 Dec 2025): ",
        DATE_RETRY,
        |text| parse_date(text).ok().map(|_| text.to_string()),
    )?;

    let task = Task::new(assignee, title, description, due_date, session.today());
    let store = session.tasks();
    store
        .append(&task)
        .with_context(|| format!("Failed to add task '{}'", task.title))?;

    console.say(format!("{}\n", "The new task was added successfully!".green()))?;
    Ok(())
}
