//! Task views: all tasks, my tasks (with selection and editing), completed tasks

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::add::DATE_RETRY;
use super::console::Console;
use super::session::Session;
use task_manager::store::{parse_date, Mutation, MutationOutcome, UserTask};

const MISSING_FILE: &str = "No tasks were found. tasks.txt does not exist yet.\n";

/// Print every task in file order
pub fn view_all<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &Session) -> Result<()> {
    console.say("--------- ALL TASKS ---------\n")?;

    let Some(records) = session.tasks().list_all()? else {
        console.say(MISSING_FILE)?;
        return Ok(());
    };

    let mut found = false;
    for task in records {
        console.say(task?.display_block())?;
        found = true;
    }

    if !found {
        console.say("No tasks were found.\n")?;
    }
    Ok(())
}

/// Print completed tasks in file order
pub fn view_completed<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
) -> Result<()> {
    let Some(completed) = session.tasks().list_completed()? else {
        console.say("No completed tasks were found. tasks.txt does not exist yet.\n")?;
        return Ok(());
    };

    console.say("--------- COMPLETED TASKS ---------\n")?;
    if completed.is_empty() {
        console.say("No completed tasks were found.\n")?;
        return Ok(());
    }

    for task in &completed {
        console.say(task.display_block())?;
    }
    Ok(())
}

/// Answer to the task selection prompt
enum Selection {
    Back,
    Task(usize),
}

/// Print the session user's tasks, then let them complete or edit one
pub fn view_mine<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &Session) -> Result<()> {
    let store = session.tasks();

    let Some(mine) = store.list_for_user(&session.username)? else {
        console.say(MISSING_FILE)?;
        return Ok(());
    };

    if mine.is_empty() {
        console.say("You have no tasks assigned to you.\n")?;
        return Ok(());
    }

    console.say("--------- MY TASKS ---------\n")?;
    for entry in &mine {
        console.say(format!("Task number: {}", entry.number))?;
        console.say(entry.task.display_block())?;
    }

    let selected = match select_task(console, mine.len())? {
        Selection::Back => return Ok(()),
        Selection::Task(number) => &mine[number - 1],
    };

    if selected.task.completed {
        console.say(format!(
            "{}\n",
            "This task was completed and cannot be edited.".red()
        ))?;
        return Ok(());
    }

    let action = console.ask(
        "Please select one of the following options:
    c - mark task as complete
    e - edit task
    : ",
    )?;

    let mutation = match action.trim().to_lowercase().as_str() {
        "c" => Mutation::Complete,
        "e" => edit_prompts(console, session, selected)?,
        _ => {
            console.say("Invalid option. Please try again.\n")?;
            return Ok(());
        }
    };

    match store.mutate(selected.index, &mutation)? {
        MutationOutcome::Completed => {
            console.say(format!("{}\n", "Task was marked as complete!".green()))?;
        }
        MutationOutcome::Updated => {
            console.say(format!("{}\n", "Task was successfully updated!".green()))?;
        }
        MutationOutcome::AlreadyCompleted => {
            console.say(format!(
                "{}\n",
                "This task was completed and cannot be edited.".red()
            ))?;
        }
        MutationOutcome::NotFound => {
            console.say("Task no longer exists.\n")?;
        }
    }
    Ok(())
}

/// Ask for a task number in `1..=count`, or -1 to go back
fn select_task<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    count: usize,
) -> Result<Selection> {
    loop {
        let answer = console.ask("Enter the task number to select task or -1 to return to menu: ")?;

        let Ok(number) = answer.trim().parse::<i64>() else {
            console.say("Invalid input. Please enter a number.\n")?;
            continue;
        };

        if number == -1 {
            return Ok(Selection::Back);
        }
        if number >= 1 && (number as usize) <= count {
            return Ok(Selection::Task(number as usize));
        }
        console.say("Invalid task number. Please try again.\n")?;
    }
}

fn says_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Collect the optional reassignment and due date for an edit
fn edit_prompts<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session,
    selected: &UserTask,
) -> Result<Mutation> {
    let mut assignee = None;
    if says_yes(&console.ask("Would you like to edit the assigned user? Yes/No: ")?) {
        let new_user = console.ask("Enter new username: ")?;
        if session.credentials.contains(&new_user) {
            assignee = Some(new_user);
        } else {
            tracing::debug!(title = %selected.task.title, %new_user, "rejected reassignment");
            console.say("User does not exist and username could not be changed.\n")?;
        }
    }

    let mut due_date = None;
    if says_yes(&console.ask("Would you like to edit the due date? Yes/No: ")?) {
        due_date = Some(console.ask_until(
            "Enter a new due date (e.g. 22 Dec 2025): ",
            DATE_RETRY,
            |text| parse_date(text).ok().map(|_| text.to_string()),
        )?);
    }

    Ok(Mutation::Edit { assignee, due_date })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::tests::{console, data_dir, fixed_today, output, session};
    use std::fs;
    use task_manager::config::DataPaths;
    use task_manager::store::{Task, TaskStore};

    fn seed(paths: &DataPaths, tasks: &[(&str, &str, &str)]) {
        let store = TaskStore::new(paths.tasks_file());
        for (assignee, title, due) in tasks {
            store
                .append(&Task::new(*assignee, *title, "desc", *due, fixed_today()))
                .unwrap();
        }
    }

    #[test]
    fn test_view_all_missing_file() {
        let (_dir, paths) = data_dir();
        let s = session(&paths, "alice");
        let mut c = console("");
        view_all(&mut c, &s).unwrap();
        assert!(output(c).contains("tasks.txt does not exist yet"));
    }

    #[test]
    fn test_view_all_empty_file() {
        let (_dir, paths) = data_dir();
        fs::write(paths.tasks_file(), "").unwrap();
        let s = session(&paths, "alice");
        let mut c = console("");
        view_all(&mut c, &s).unwrap();

        let out = output(c);
        assert!(out.contains("No tasks were found.\n"));
        assert!(!out.contains("does not exist"));
    }

    #[test]
    fn test_view_all_lists_every_task() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027"), ("admin", "B1", "02 Jan 2027")]);
        let s = session(&paths, "alice");
        let mut c = console("");
        view_all(&mut c, &s).unwrap();

        let out = output(c);
        assert!(out.contains("Task title: A1"));
        assert!(out.contains("Task title: B1"));
    }

    #[test]
    fn test_view_completed() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027"), ("alice", "A2", "02 Jan 2027")]);
        let s = session(&paths, "admin");

        let mut c = console("");
        view_completed(&mut c, &s).unwrap();
        assert!(output(c).contains("No completed tasks were found.\n"));

        s.tasks().mutate(1, &Mutation::Complete).unwrap();
        let mut c = console("");
        view_completed(&mut c, &s).unwrap();
        let out = output(c);
        assert!(out.contains("Task title: A2"));
        assert!(!out.contains("Task title: A1"));
    }

    #[test]
    fn test_view_mine_without_tasks() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("admin", "B1", "02 Jan 2027")]);
        let s = session(&paths, "alice");
        let mut c = console("");
        view_mine(&mut c, &s).unwrap();
        assert!(output(c).contains("You have no tasks assigned to you."));
    }

    #[test]
    fn test_view_mine_back_to_menu() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027")]);
        let before = fs::read_to_string(paths.tasks_file()).unwrap();
        let s = session(&paths, "alice");
        let mut c = console("-1\n");
        view_mine(&mut c, &s).unwrap();

        assert!(output(c).contains("Task number: 1"));
        assert_eq!(fs::read_to_string(paths.tasks_file()).unwrap(), before);
    }

    #[test]
    fn test_view_mine_complete_then_cannot_edit() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("admin", "B1", "02 Jan 2027"), ("alice", "A1", "01 Jan 2027")]);
        let s = session(&paths, "alice");

        let mut c = console("abc\n5\n1\nc\n");
        view_mine(&mut c, &s).unwrap();
        let out = output(c);
        assert!(out.contains("Invalid input. Please enter a number."));
        assert!(out.contains("Invalid task number. Please try again."));
        assert!(out.contains("Task was marked as complete!"));

        let tasks = s.tasks().load().unwrap().unwrap();
        assert!(!tasks[0].completed);
        assert!(tasks[1].completed);

        let after_complete = fs::read_to_string(paths.tasks_file()).unwrap();
        let mut c = console("1\n");
        view_mine(&mut c, &s).unwrap();
        assert!(output(c).contains("This task was completed and cannot be edited."));
        assert_eq!(fs::read_to_string(paths.tasks_file()).unwrap(), after_complete);
    }

    #[test]
    fn test_view_mine_edit_user_and_due_date() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027"), ("alice", "A2", "02 Jan 2027")]);
        let s = session(&paths, "alice");

        let mut c = console("2\nE\nyes\nadmin\nYes\nsoon\n22 Dec 2027\n");
        view_mine(&mut c, &s).unwrap();
        let out = output(c);
        assert!(out.contains("Invalid date format."));
        assert!(out.contains("Task was successfully updated!"));

        let tasks = s.tasks().load().unwrap().unwrap();
        assert_eq!(tasks[0].assignee, "alice");
        assert_eq!(tasks[1].assignee, "admin");
        assert_eq!(tasks[1].due_date, "22 Dec 2027");
    }

    #[test]
    fn test_view_mine_invalid_reassignment_keeps_editing() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027")]);
        let s = session(&paths, "alice");

        let mut c = console("1\ne\nyes\nmallory\nyes\n05 May 2027\n");
        view_mine(&mut c, &s).unwrap();
        assert!(output(c).contains("User does not exist and username could not be changed."));

        let tasks = s.tasks().load().unwrap().unwrap();
        assert_eq!(tasks[0].assignee, "alice");
        assert_eq!(tasks[0].due_date, "05 May 2027");
    }

    #[test]
    fn test_view_mine_invalid_action_writes_nothing() {
        let (_dir, paths) = data_dir();
        seed(&paths, &[("alice", "A1", "01 Jan 2027")]);
        let before = fs::read_to_string(paths.tasks_file()).unwrap();
        let s = session(&paths, "alice");

        let mut c = console("1\nx\n");
        view_mine(&mut c, &s).unwrap();
        assert!(output(c).contains("Invalid option. Please try again."));
        assert_eq!(fs::read_to_string(paths.tasks_file()).unwrap(), before);
    }
}
