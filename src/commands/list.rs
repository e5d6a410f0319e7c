//! List command - Print tasks as a table

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use task_manager::config::DataPaths;
use task_manager::store::TaskStore;

/// Options for the list command
pub struct ListOptions {
    /// Only tasks assigned to this user
    pub user: Option<String>,
    /// Only completed tasks
    pub completed: bool,
}

/// Execute the list command and return formatted output
pub fn execute(paths: &DataPaths, options: ListOptions) -> Result<String> {
    let store = TaskStore::new(paths.tasks_file());

    let Some(mut tasks) = store
        .load()
        .with_context(|| format!("Failed to read: {}", store.path().display()))?
    else {
        return Ok(format!(
            "No tasks were found. {} does not exist yet.",
            store.path().display()
        ));
    };

    if let Some(ref user) = options.user {
        tasks.retain(|t| &t.assignee == user);
    }
    if options.completed {
        tasks.retain(|t| t.completed);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Assigned to"),
        Cell::new("Title"),
        Cell::new("Description"),
        Cell::new("Assigned"),
        Cell::new("Due"),
        Cell::new("Completed"),
    ]);

    for task in &tasks {
        table.add_row(vec![
            Cell::new(&task.assignee),
            Cell::new(&task.title),
            Cell::new(&task.description),
            Cell::new(&task.date_assigned),
            Cell::new(&task.due_date),
            Cell::new(task.completed_label()),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!("\n\n{} tasks found", tasks.len()));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::tests::{data_dir, fixed_today};
    use task_manager::store::{Mutation, Task};

    fn seeded() -> (tempfile::TempDir, DataPaths) {
        let (dir, paths) = data_dir();
        let store = TaskStore::new(paths.tasks_file());
        store
            .append(&Task::new("alice", "Alpha", "first", "01 Jan 2027", fixed_today()))
            .unwrap();
        store
            .append(&Task::new("admin", "Beta", "second", "02 Jan 2027", fixed_today()))
            .unwrap();
        store.mutate(1, &Mutation::Complete).unwrap();
        (dir, paths)
    }

    #[test]
    fn test_list_all() {
        let (_dir, paths) = seeded();
        let out = execute(
            &paths,
            ListOptions {
                user: None,
                completed: false,
            },
        )
        .unwrap();
        assert!(out.contains("Alpha"));
        assert!(out.contains("Beta"));
        assert!(out.ends_with("2 tasks found"));
    }

    #[test]
    fn test_list_filters() {
        let (_dir, paths) = seeded();
        let out = execute(
            &paths,
            ListOptions {
                user: Some("alice".to_string()),
                completed: false,
            },
        )
        .unwrap();
        assert!(out.contains("Alpha"));
        assert!(!out.contains("Beta"));

        let out = execute(
            &paths,
            ListOptions {
                user: None,
                completed: true,
            },
        )
        .unwrap();
        assert!(!out.contains("Alpha"));
        assert!(out.contains("Beta"));
    }

    #[test]
    fn test_list_missing_file() {
        let (_dir, paths) = data_dir();
        let out = execute(
            &paths,
            ListOptions {
                user: None,
                completed: false,
            },
        )
        .unwrap();
        assert!(out.contains("does not exist yet"));
    }
}
