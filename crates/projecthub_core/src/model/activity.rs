//! Activity feed model.
//!
//! Activity items are append-mostly history entries; queries always return
//! them newest first.

use crate::model::common::{require_text, ModelValidationError, Timestamp};
use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ActivityId = Uuid;

pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 10;
pub const DEFAULT_PROJECT_ACTIVITY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCreated,
    TaskUpdated,
    TaskCompleted,
    CommentAdded,
    ProjectCreated,
    UserJoined,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::TaskCreated => "Task Created",
            Self::TaskUpdated => "Task Updated",
            Self::TaskCompleted => "Task Completed",
            Self::CommentAdded => "Comment Added",
            Self::ProjectCreated => "Project Created",
            Self::UserJoined => "User Joined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: ActivityId,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Acting user.
    pub user: UserId,
    pub timestamp: Timestamp,
    pub project_id: Option<ProjectId>,
    pub task_id: Option<TaskId>,
}

impl ActivityItem {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub user: UserId,
    pub project_id: Option<ProjectId>,
    pub task_id: Option<TaskId>,
    /// Defaults to the store clock.
    pub timestamp: Option<Timestamp>,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, user: UserId, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: String::new(),
            user,
            project_id: None,
            task_id: None,
            timestamp: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn on_task(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ActivityPatch {
    pub fn apply_to(self, item: &mut ActivityItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
    }
}

/// Activity feed query. Results are sorted newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    pub project_id: Option<ProjectId>,
    pub task_id: Option<TaskId>,
    pub user: Option<UserId>,
    /// Empty matches every kind.
    pub kinds: Vec<ActivityKind>,
    /// `None` returns every match.
    pub limit: Option<usize>,
}

impl ActivityQuery {
    /// Feed of the whole workspace.
    pub fn recent(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Feed scoped to one project.
    pub fn for_project(project_id: ProjectId, limit: usize) -> Self {
        Self {
            project_id: Some(project_id),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &ActivityItem) -> bool {
        if self.project_id.is_some() && item.project_id != self.project_id {
            return false;
        }
        if self.task_id.is_some() && item.task_id != self.task_id {
            return false;
        }
        if let Some(user) = self.user {
            if item.user != user {
                return false;
            }
        }
        self.kinds.is_empty() || self.kinds.contains(&item.kind)
    }
}
