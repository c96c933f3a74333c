//! Domain model for the project-management workspace.
//!
//! # Responsibility
//! - Define typed records for users, projects, tasks and activity.
//! - Define draft (create), patch (update) and filter shapes per record.
//!
//! # Invariants
//! - Every record is identified by a stable UUIDv7.
//! - Records reference each other by id; ownership lives in the store.
//! - `validate()` is the single source of truth for per-record invariants.

pub mod activity;
pub mod common;
pub mod project;
pub mod task;
pub mod user;
