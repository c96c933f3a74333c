//! Kanban board projection.
//!
//! # Invariants
//! - Columns follow `TaskStatus::ALL` order.
//! - Each task appears in exactly one column, in insertion order.
//! - A column is over its limit only when it has a limit and more tasks
//!   than that limit.

use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskFilter, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::service::latency::{LatencyProfile, Operation};
use serde::Serialize;

/// Static layout of one board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub status: TaskStatus,
    pub color: &'static str,
    /// Work-in-progress limit.
    pub limit: Option<usize>,
}

pub const DEFAULT_BOARD_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec {
        id: "todo",
        title: "To Do",
        status: TaskStatus::Todo,
        color: "#6B7280",
        limit: None,
    },
    ColumnSpec {
        id: "in-progress",
        title: "In Progress",
        status: TaskStatus::InProgress,
        color: "#3B82F6",
        limit: Some(5),
    },
    ColumnSpec {
        id: "review",
        title: "In Review",
        status: TaskStatus::Review,
        color: "#F59E0B",
        limit: Some(3),
    },
    ColumnSpec {
        id: "done",
        title: "Done",
        status: TaskStatus::Done,
        color: "#10B981",
        limit: None,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardColumn {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub color: String,
    pub limit: Option<usize>,
    pub tasks: Vec<Task>,
}

impl BoardColumn {
    pub fn is_over_limit(&self) -> bool {
        self.limit.is_some_and(|limit| self.tasks.len() > limit)
    }
}

pub struct BoardService<'s, R: TaskRepository> {
    repo: &'s R,
    latency: LatencyProfile,
}

impl<'s, R: TaskRepository> BoardService<'s, R> {
    pub fn new(repo: &'s R) -> Self {
        Self {
            repo,
            latency: LatencyProfile::none(),
        }
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    /// Board for one project, or for every task when `project_id` is `None`.
    pub fn board(&self, project_id: Option<ProjectId>) -> Vec<BoardColumn> {
        self.latency.pause(Operation::Board);
        let filter = TaskFilter {
            project: project_id.into_iter().collect(),
            ..TaskFilter::default()
        };
        let mut tasks = self.repo.list_tasks(&filter);

        DEFAULT_BOARD_COLUMNS
            .iter()
            .map(|layout| {
                let (column_tasks, rest): (Vec<Task>, Vec<Task>) = std::mem::take(&mut tasks)
                    .into_iter()
                    .partition(|task| task.status == layout.status);
                tasks = rest;
                BoardColumn {
                    id: layout.id.to_string(),
                    title: layout.title.to_string(),
                    status: layout.status,
                    color: layout.color.to_string(),
                    limit: layout.limit,
                    tasks: column_tasks,
                }
            })
            .collect()
    }
}
