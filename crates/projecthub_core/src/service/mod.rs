//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Apply simulated latency and emit structured log events.
//! - Keep view layers decoupled from the record store.
//!
//! # Invariants
//! - Mutating services borrow the store exclusively for their lifetime;
//!   read-only services share it.

pub mod activity_service;
pub mod board_service;
pub mod dashboard_service;
pub mod latency;
pub mod project_service;
pub mod search_service;
pub mod task_service;
pub mod user_service;
