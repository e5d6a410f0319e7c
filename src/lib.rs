//! task-manager library
//!
//! Flat-file task tracking: a credential store, a task store with
//! full-rewrite mutations, and summary report generation.

pub mod config;
pub mod error;
pub mod report;
pub mod store;
