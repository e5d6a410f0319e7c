//! Data directory and backing file locations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "TASK_MANAGER_DIR";

const USERS_FILE: &str = "user.txt";
const TASKS_FILE: &str = "tasks.txt";
const TASK_OVERVIEW_FILE: &str = "task_overview.txt";
const USER_OVERVIEW_FILE: &str = "user_overview.txt";

/// Locations of the four files the tracker reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve the data directory: explicit path first, then the current directory
    ///
    /// `--data-dir` and `TASK_MANAGER_DIR` both arrive here through clap.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let dir = match explicit {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Credential file (`username, password` per line)
    pub fn users_file(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    /// Task file (six fields per line)
    pub fn tasks_file(&self) -> PathBuf {
        self.dir.join(TASKS_FILE)
    }

    pub fn task_overview_file(&self) -> PathBuf {
        self.dir.join(TASK_OVERVIEW_FILE)
    }

    pub fn user_overview_file(&self) -> PathBuf {
        self.dir.join(USER_OVERVIEW_FILE)
    }
}
