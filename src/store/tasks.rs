//! Task store backed by `tasks.txt`
//!
//! New tasks are appended. Every other mutation reads the whole file,
//! changes the in-memory list, and rewrites the whole file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Lines, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::record::Task;
use crate::error::{Error, Result};

/// A task of one user, with both of its positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTask {
    /// 1-based number shown to the user
    pub number: usize,
    /// 0-based position among all records in the file
    pub index: usize,
    pub task: Task,
}

/// Change requested for a selected task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Complete,
    Edit {
        assignee: Option<String>,
        due_date: Option<String>,
    },
}

/// Result of [`TaskStore::mutate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Completed,
    Updated,
    /// The task is already complete and cannot be edited
    AlreadyCompleted,
    NotFound,
}

/// Lazy iterator over the records of a task file
pub struct Records {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line: usize,
}

impl Iterator for Records {
    type Item = Result<Task>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::io(&self.path, e))),
            };
            self.line += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(Task::parse_line(&line).map_err(|reason| Error::MalformedRecord {
                path: self.path.clone(),
                line: self.line,
                reason,
            }));
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one record
    pub fn append(&self, task: &Task) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;

        writeln!(file, "{}", task.to_line())
            .and_then(|_| file.flush())
            .map_err(|e| Error::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), title = %task.title, "appended task");
        Ok(())
    }

    /// All records in file order, or `None` when the file does not exist
    pub fn list_all(&self) -> Result<Option<Records>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        Ok(Some(Records {
            path: self.path.clone(),
            lines: BufReader::new(file).lines(),
            line: 0,
        }))
    }

    /// Read every record into memory
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        match self.list_all()? {
            Some(records) => records.collect::<Result<Vec<_>>>().map(Some),
            None => Ok(None),
        }
    }

    /// Tasks assigned to `username`, numbered from 1
    pub fn list_for_user(&self, username: &str) -> Result<Option<Vec<UserTask>>> {
        let Some(tasks) = self.load()? else {
            return Ok(None);
        };

        let mine = tasks
            .into_iter()
            .enumerate()
            .filter(|(_, task)| task.assignee == username)
            .enumerate()
            .map(|(position, (index, task))| UserTask {
                number: position + 1,
                index,
                task,
            })
            .collect();

        Ok(Some(mine))
    }

    /// Completed tasks in file order
    pub fn list_completed(&self) -> Result<Option<Vec<Task>>> {
        Ok(self
            .load()?
            .map(|tasks| tasks.into_iter().filter(|t| t.completed).collect()))
    }

    /// Apply a mutation to the record at file position `index`
    ///
    /// Completed records are never changed. Any accepted change rewrites the
    /// whole file.
    pub fn mutate(&self, index: usize, mutation: &Mutation) -> Result<MutationOutcome> {
        let Some(mut tasks) = self.load()? else {
            return Ok(MutationOutcome::NotFound);
        };

        let Some(task) = tasks.get_mut(index) else {
            return Ok(MutationOutcome::NotFound);
        };

        if task.completed {
            return Ok(MutationOutcome::AlreadyCompleted);
        }

        let outcome = match mutation {
            Mutation::Complete => {
                task.completed = true;
                MutationOutcome::Completed
            }
            Mutation::Edit { assignee, due_date } => {
                if let Some(assignee) = assignee {
                    task.assignee = assignee.clone();
                }
                if let Some(due_date) = due_date {
                    task.due_date = due_date.clone();
                }
                MutationOutcome::Updated
            }
        };

        self.save(&tasks)?;
        Ok(outcome)
    }

    /// Remove every record whose title equals `title`
    ///
    /// Returns `None` when the file does not exist, otherwise whether
    /// anything was removed.
    pub fn delete_by_title(&self, title: &str) -> Result<Option<bool>> {
        let Some(tasks) = self.load()? else {
            return Ok(None);
        };

        let before = tasks.len();
        let kept: Vec<Task> = tasks.into_iter().filter(|t| t.title != title).collect();
        let deleted = kept.len() != before;

        self.save(&kept)?;
        Ok(Some(deleted))
    }

    /// Replace the file with `tasks`
    ///
    /// Written to a temporary file in the same directory, then renamed over
    /// the target. An existing target keeps its permissions.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            for task in tasks {
                writeln!(writer, "{}", task.to_line()).map_err(|e| Error::io(temp.path(), e))?;
            }
            writer.flush().map_err(|e| Error::io(temp.path(), e))?;
        }

        match fs::metadata(&self.path) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| Error::io(temp.path(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.path, e)),
        }

        temp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), tasks = tasks.len(), "rewrote task file");
        Ok(())
    }
}
