//! Credential store backed by `user.txt`

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::record::FIELD_SEPARATOR;
use crate::error::{Error, Result};

/// A username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Why a login attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UnknownUser,
    WrongPassword,
}

/// In-memory view of the credential file, in file order
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    credentials: Vec<Credential>,
    found: bool,
}

impl CredentialStore {
    /// Load the credential file
    ///
    /// A missing file yields an empty store; check [`CredentialStore::found`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "credential file not found");
                return Ok(Self {
                    path,
                    credentials: Vec::new(),
                    found: false,
                });
            }
            Err(e) => return Err(Error::io(&path, e)),
        };

        let mut credentials = Vec::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let (username, password) = line.split_once(FIELD_SEPARATOR).ok_or_else(|| {
                Error::MalformedRecord {
                    path: path.clone(),
                    line: index + 1,
                    reason: "expected 'username, password'".to_string(),
                }
            })?;
            credentials.push(Credential {
                username: username.to_string(),
                password: password.to_string(),
            });
        }

        tracing::debug!(path = %path.display(), users = credentials.len(), "loaded credentials");

        Ok(Self {
            path,
            credentials,
            found: true,
        })
    }

    /// Whether the backing file existed at load time
    pub fn found(&self) -> bool {
        self.found
    }

    pub fn contains(&self, username: &str) -> bool {
        self.credentials.iter().any(|c| c.username == username)
    }

    /// Registered usernames in file order
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.credentials.iter().map(|c| c.username.as_str())
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Exact, case-sensitive match on both fields
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<(), AuthFailure> {
        match self.credentials.iter().find(|c| c.username == username) {
            None => Err(AuthFailure::UnknownUser),
            Some(c) if c.password != password => Err(AuthFailure::WrongPassword),
            Some(_) => Ok(()),
        }
    }

    /// Append a new user to the file and the in-memory mapping
    pub fn register(&mut self, username: &str, password: &str, confirmation: &str) -> Result<()> {
        if username.is_empty() || username.contains(FIELD_SEPARATOR) || username.contains('\n') {
            return Err(Error::InvalidCredential(username.to_string()));
        }
        if password.contains('\n') {
            return Err(Error::InvalidCredential(username.to_string()));
        }
        if self.contains(username) {
            return Err(Error::UsernameTaken(username.to_string()));
        }
        if password != confirmation {
            return Err(Error::PasswordMismatch);
        }

        // A new line goes on its own line even if the file lacks a trailing newline
        let needs_newline = match fs::read(&self.path) {
            Ok(bytes) => !bytes.is_empty() && !bytes.ends_with(b"\n"),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(&self.path, e))?;

        let mut entry = String::new();
        if needs_newline {
            entry.push('\n');
        }
        entry.push_str(username);
        entry.push_str(FIELD_SEPARATOR);
        entry.push_str(password);

        file.write_all(entry.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| Error::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), username, "registered user");

        self.credentials.push(Credential {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.found = true;
        Ok(())
    }
}
