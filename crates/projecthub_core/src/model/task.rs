//! Task domain model with its nested subtasks, comments and attachments.
//!
//! # Responsibility
//! - Define the task record and the child records that live inside it.
//! - Provide partial-update and filter shapes used by the store.
//!
//! # Invariants
//! - `title` is never blank.
//! - Hour fields are finite and non-negative when set.
//! - A task never lists itself in `dependencies`.
//! - Child records have no lifecycle outside their parent task.

use crate::model::common::{
    require_hours, require_text, DateRange, ModelValidationError, Priority, Timestamp,
};
use crate::model::project::ProjectId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub type TaskId = Uuid;
pub type SubtaskId = Uuid;
pub type CommentId = Uuid;
pub type AttachmentId = Uuid;

pub const DEFAULT_TASK_TITLE: &str = "Untitled Task";
/// Upload limit applied when no explicit configuration is provided.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Workflow state of a task.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Board order, left to right.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "In Review",
            Self::Done => "Done",
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    pub completed: bool,
    pub assignee: Option<UserId>,
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub url: String,
    /// MIME type, serialized as `type`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    pub uploaded_by: UserId,
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub author: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub mentions: Vec<UserId>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<UserId>,
    pub reporter: UserId,
    pub project_id: ProjectId,
    pub subtasks: Vec<Subtask>,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
    pub tags: Vec<String>,
    pub due_date: Option<Timestamp>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub dependencies: Vec<TaskId>,
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("title", &self.title)?;
        require_hours("estimated_hours", self.estimated_hours)?;
        require_hours("actual_hours", self.actual_hours)?;
        if self.dependencies.contains(&self.id) {
            return Err(ModelValidationError::SelfDependency(self.id));
        }
        Ok(())
    }

    /// Share of completed subtasks in percent, `None` without subtasks.
    pub fn subtask_progress(&self) -> Option<u8> {
        if self.subtasks.is_empty() {
            return None;
        }
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        Some(((done * 100) / self.subtasks.len()) as u8)
    }
}

/// Input for creating a task. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    /// Must reference an existing project.
    pub project_id: ProjectId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<UserId>,
    /// Defaults to the current user.
    pub reporter: Option<UserId>,
    pub tags: Vec<String>,
    pub due_date: Option<Timestamp>,
    pub estimated_hours: Option<f64>,
    pub dependencies: Vec<TaskId>,
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

impl NewTask {
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Shallow-merge update for a task. Child collections are edited through
/// dedicated store operations instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    /// `Some(None)` unassigns the task.
    pub assignee: Option<Option<UserId>>,
    pub reporter: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Option<Timestamp>>,
    pub estimated_hours: Option<Option<f64>>,
    pub actual_hours: Option<Option<f64>>,
    pub dependencies: Option<Vec<TaskId>>,
    pub custom_fields: Option<BTreeMap<String, serde_json::Value>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(reporter) = self.reporter {
            task.reporter = reporter;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(estimated_hours) = self.estimated_hours {
            task.estimated_hours = estimated_hours;
        }
        if let Some(actual_hours) = self.actual_hours {
            task.actual_hours = actual_hours;
        }
        if let Some(dependencies) = self.dependencies {
            task.dependencies = dependencies;
        }
        if let Some(custom_fields) = self.custom_fields {
            task.custom_fields = custom_fields;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSubtask {
    pub title: String,
    pub assignee: Option<UserId>,
    pub due_date: Option<Timestamp>,
}

impl NewSubtask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAttachment {
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size: u64,
    pub uploaded_by: UserId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub author: UserId,
    pub mentions: Vec<UserId>,
    pub attachments: Vec<NewAttachment>,
}

impl NewComment {
    pub fn new(author: UserId, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author,
            ..Self::default()
        }
    }
}

/// Conjunctive task list filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Unassigned tasks never match a non-empty assignee filter.
    pub assignee: Vec<UserId>,
    pub status: Vec<TaskStatus>,
    pub priority: Vec<Priority>,
    pub project: Vec<ProjectId>,
    /// Matches when the task carries at least one of these tags.
    pub tags: Vec<String>,
    /// Case-insensitive substring over title and description.
    pub search: Option<String>,
    /// Inclusive due-date window; tasks without a due date never match.
    pub due_within: Option<DateRange>,
}
