//! CLI commands

pub mod add;
pub mod console;
pub mod delete;
pub mod list;
pub mod register;
pub mod reports;
pub mod session;
pub mod view;
