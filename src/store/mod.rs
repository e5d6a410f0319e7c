//! Flat-file persistence for credentials and tasks

pub mod credentials;
pub mod record;
pub mod tasks;

pub use credentials::{AuthFailure, Credential, CredentialStore};
pub use record::{format_date, parse_date, Task, DATE_FORMAT};
pub use tasks::{Mutation, MutationOutcome, Records, TaskStore, UserTask};
