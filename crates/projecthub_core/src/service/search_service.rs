//! Workspace-wide keyword search.
//!
//! Matching is a case-insensitive substring test:
//! - projects: name, description
//! - tasks: title, description, tags
//! - users: name, email
//!
//! A blank query matches every record.

use crate::model::common::{contains_folded, search_needle};
use crate::model::project::{Project, ProjectFilter};
use crate::model::task::{Task, TaskFilter};
use crate::model::user::{User, UserFilter};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::latency::{LatencyProfile, Operation};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalSearchResult {
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
}

impl GlobalSearchResult {
    pub fn total(&self) -> usize {
        self.projects.len() + self.tasks.len() + self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub struct SearchService<'s, R> {
    repo: &'s R,
    latency: LatencyProfile,
}

impl<'s, R> SearchService<'s, R>
where
    R: ProjectRepository + TaskRepository + UserRepository,
{
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

    pub fn global_search(&self, query: &str) -> GlobalSearchResult {
        self.latency.pause(Operation::GlobalSearch);
        let projects = self.repo.list_projects(&ProjectFilter {
            search: Some(query.to_string()),
            ..ProjectFilter::default()
        });
        let users = self.repo.list_users(&UserFilter {
            search: Some(query.to_string()),
            ..UserFilter::default()
        });

        let mut tasks = self.repo.list_tasks(&TaskFilter::default());
        if let Some(needle) = search_needle(Some(query)) {
            tasks.retain(|task| {
                contains_folded(&task.title, &needle)
                    || contains_folded(&task.description, &needle)
                    || task.tags.iter().any(|tag| contains_folded(tag, &needle))
            });
        }

        let result = GlobalSearchResult {
            projects,
            tasks,
            users,
        };
        debug!(
            "event=global_search module=search_service status=ok query_len={} hits={}",
            query.chars().count(),
            result.total()
        );
        result
    }
}
