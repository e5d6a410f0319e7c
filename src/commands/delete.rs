//! Delete task command

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::console::Console;
use super::session::Session;

/// Remove every task with the given title
pub fn execute<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &Session) -> Result<()> {
    let title = console.ask("Enter the title of the task you want to delete: ")?;

    match session.tasks().delete_by_title(&title)? {
        None => console.say("Tasks file does not exist yet.\n")?,
        Some(true) => console.say(format!("{}\n", "Task was successfully deleted.".green()))?,
        Some(false) => console.say("Task was not found.\n")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::tests::{console, data_dir, fixed_today, output, session};
    use task_manager::store::Task;

    #[test]
    fn test_delete_one_of_two() {
        let (_dir, paths) = data_dir();
        let s = session(&paths, "admin");
        let keep = Task::new("admin", "Keep me", "desc", "02 Jan 2027", fixed_today());
        s.tasks()
            .append(&Task::new("alice", "Drop me", "desc", "01 Jan 2027", fixed_today()))
            .unwrap();
        s.tasks().append(&keep).unwrap();

        let mut c = console("Drop me\n");
        execute(&mut c, &s).unwrap();
        assert!(output(c).contains("Task was successfully deleted."));
        assert_eq!(s.tasks().load().unwrap(), Some(vec![keep]));
    }

    #[test]
    fn test_delete_unknown_title() {
        let (_dir, paths) = data_dir();
        let s = session(&paths, "admin");
        s.tasks()
            .append(&Task::new("alice", "Only", "desc", "01 Jan 2027", fixed_today()))
            .unwrap();

        let mut c = console("only\n");
        execute(&mut c, &s).unwrap();
        assert!(output(c).contains("Task was not found."));
        assert_eq!(s.tasks().load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_without_file() {
        let (_dir, paths) = data_dir();
        let s = session(&paths, "admin");
        let mut c = console("Anything\n");
        execute(&mut c, &s).unwrap();
        assert!(output(c).contains("Tasks file does not exist yet."));
        assert!(!paths.tasks_file().exists());
    }
}
