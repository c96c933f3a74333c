//! Project domain model.
//!
//! # Responsibility
//! - Define the project record, its status lifecycle and partial updates.
//! - Validate project invariants before the store accepts a write.
//!
//! # Invariants
//! - `progress` is within `0..=100`.
//! - `end_date` is not earlier than `start_date`.
//! - `color` is a `#RRGGBB` tag.
//! - `team` holds unique user ids; the owner is always a member.
//! - Tasks are linked through `Task::project_id`, never stored here.

use crate::model::common::{is_hex_color, require_text, ModelValidationError, Priority, Timestamp};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";
pub const MAX_PROGRESS: u8 = 100;

/// Palette offered for new projects.
pub const PROJECT_COLORS: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16", "#F97316",
    "#EC4899", "#6B7280",
];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Archived,
        ProjectStatus::OnHold,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
            Self::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub color: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    /// Completion percent, `0..=100`.
    pub progress: u8,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub owner: UserId,
    pub team: Vec<UserId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Name of the template the project was created from, if any.
    pub template: Option<String>,
}

impl Project {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("name", &self.name)?;
        if self.progress > MAX_PROGRESS {
            return Err(ModelValidationError::ProgressOutOfRange(self.progress));
        }
        if self.end_date < self.start_date {
            return Err(ModelValidationError::DateRangeReversed {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if !is_hex_color(&self.color) {
            return Err(ModelValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }

    /// Whether the user owns the project or is on its team.
    pub fn has_member(&self, user: UserId) -> bool {
        self.owner == user || self.team.contains(&user)
    }
}

/// Input for creating a project.
///
/// Status always starts as `Active` and progress as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub priority: Option<Priority>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    /// Defaults to the current user.
    pub owner: Option<UserId>,
    /// Defaults to `[owner]`.
    pub team: Option<Vec<UserId>>,
    pub template: Option<String>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Shallow-merge update for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub progress: Option<u8>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub owner: Option<UserId>,
    pub team: Option<Vec<UserId>>,
    /// `Some(None)` clears the template.
    pub template: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(color) = self.color {
            project.color = color;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(priority) = self.priority {
            project.priority = priority;
        }
        if let Some(progress) = self.progress {
            project.progress = progress;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            project.end_date = end_date;
        }
        if let Some(owner) = self.owner {
            project.owner = owner;
        }
        if let Some(team) = self.team {
            project.team = team;
        }
        if let Some(template) = self.template {
            project.template = template;
        }
    }
}

/// Conjunctive project list filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Vec<ProjectStatus>,
    pub priority: Vec<Priority>,
    /// Matches projects owned by or staffed with any of these users.
    pub member: Vec<UserId>,
    /// Case-insensitive substring over name and description.
    pub search: Option<String>,
}
