//! Record store and per-entity repository contracts.
//!
//! # Responsibility
//! - Own the in-memory collections for projects, tasks, users and activity.
//! - Define use-case oriented data access traits, one per record kind.
//! - Enforce record validation and cross-record references on every write.
//!
//! # Invariants
//! - Writes validate the merged record before committing it; a rejected
//!   write leaves the collection unchanged.
//! - Lookups return `None` for unknown ids; updates return `NotFound`.
//! - Collections keep insertion order.

pub mod activity_repo;
pub mod project_repo;
pub mod seed;
pub mod store;
pub mod task_repo;
pub mod user_repo;

use crate::model::common::ModelValidationError;
use crate::model::user::UserId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Record kinds addressed by repository errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Project,
    Task,
    Subtask,
    User,
    Activity,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Subtask => "subtask",
            Self::User => "user",
            Self::Activity => "activity",
        })
    }
}

/// Repository error for record store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ModelValidationError),
    /// Target record of an update does not exist.
    NotFound { kind: RecordKind, id: Uuid },
    /// A written record points at a record that does not exist.
    UnknownReference { kind: RecordKind, id: Uuid },
    /// A default owner/reporter was needed but no user is registered.
    NoCurrentUser,
    /// User is still referenced by a project or task.
    UserInUse(UserId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::UnknownReference { kind, id } => {
                write!(f, "referenced {kind} does not exist: {id}")
            }
            Self::NoCurrentUser => write!(f, "no user registered to act as current user"),
            Self::UserInUse(id) => {
                write!(f, "user {id} is still referenced by projects or tasks")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
