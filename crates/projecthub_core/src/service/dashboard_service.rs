//! Dashboard and report read models.
//!
//! # Responsibility
//! - Aggregate the store into the counters and lists the dashboard shows.
//! - Produce per-status and per-priority breakdowns for reports.
//! - Report completion rates overall and per team member.
//!
//! # Invariants
//! - Counters are recomputed from the collections on every call.
//! - Pending tasks are all tasks whose status is not `done`.
//! - Upcoming deadlines are open tasks due at or after "now", earliest
//!   first; ties keep insertion order.
//! - Completion rates are whole percents rounded half up, `0` when there
//!   is nothing to complete.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::model::activity::{ActivityItem, ActivityQuery};
use crate::model::common::Priority;
use crate::model::project::{ProjectFilter, ProjectId, ProjectStatus};
use crate::model::task::{Task, TaskFilter, TaskStatus};
use crate::model::user::{UserFilter, UserId};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::latency::{LatencyProfile, Operation};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub team_members: usize,
    pub recent_activity: Vec<ActivityItem>,
    pub upcoming_deadlines: Vec<Task>,
    pub project_progress: Vec<ProjectProgress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    pub project_id: ProjectId,
    pub name: String,
    pub color: String,
    /// Reported progress percent of the project record.
    pub progress: u8,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub by_status: BTreeMap<ProjectStatus, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Percent of all tasks that are done.
    pub completion_rate: u8,
    pub by_status: BTreeMap<TaskStatus, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

/// Assigned-task tally for one team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberPerformance {
    pub user_id: UserId,
    pub name: String,
    pub assigned_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u8,
}

/// `completed` out of `total` as a whole percent; `0` for an empty total.
pub fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (completed.min(total) * 200 + total) / (2 * total);
    percent as u8
}

pub struct DashboardService<'s, R> {
    repo: &'s R,
    latency: LatencyProfile,
    recent_activity_limit: usize,
    upcoming_deadline_limit: usize,
}

impl<'s, R> DashboardService<'s, R>
where
    R: ProjectRepository + TaskRepository + UserRepository + ActivityRepository + Clock,
{
    pub fn new(repo: &'s R) -> Self {
        Self::with_config(repo, &CoreConfig::default())
    }

    pub fn with_config(repo: &'s R, config: &CoreConfig) -> Self {
        Self {
            repo,
            latency: config.latency,
            recent_activity_limit: config.recent_activity_limit,
            upcoming_deadline_limit: config.upcoming_deadline_limit,
        }
    }

    pub fn dashboard(&self) -> DashboardSummary {
        self.latency.pause(Operation::Dashboard);
        let projects = self.repo.list_projects(&ProjectFilter::default());
        let tasks = self.repo.list_tasks(&TaskFilter::default());
        let now = self.repo.now_ms();

        let completed_tasks = tasks.iter().filter(|task| task.status.is_done()).count();

        let mut upcoming: Vec<Task> = tasks
            .iter()
            .filter(|task| !task.status.is_done())
            .filter(|task| task.due_date.is_some_and(|due| due >= now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|task| task.due_date);
        upcoming.truncate(self.upcoming_deadline_limit);

        let project_progress = projects
            .iter()
            .map(|project| {
                let owned = tasks.iter().filter(|task| task.project_id == project.id);
                let (total_tasks, completed) = owned.fold((0, 0), |(total, done), task| {
                    (total + 1, done + usize::from(task.status.is_done()))
                });
                ProjectProgress {
                    project_id: project.id,
                    name: project.name.clone(),
                    color: project.color.clone(),
                    progress: project.progress,
                    total_tasks,
                    completed_tasks: completed,
                }
            })
            .collect();

        let summary = DashboardSummary {
            total_projects: projects.len(),
            active_projects: projects
                .iter()
                .filter(|project| project.status == ProjectStatus::Active)
                .count(),
            completed_tasks,
            pending_tasks: tasks.len() - completed_tasks,
            team_members: self.repo.list_users(&UserFilter::default()).len(),
            recent_activity: self
                .repo
                .list_activity(&ActivityQuery::recent(self.recent_activity_limit)),
            upcoming_deadlines: upcoming,
            project_progress,
        };
        debug!(
            "event=dashboard_build module=dashboard_service status=ok projects={} tasks={}",
            summary.total_projects,
            tasks.len()
        );
        summary
    }

    pub fn project_stats(&self) -> ProjectStats {
        self.latency.pause(Operation::ProjectStats);
        let mut stats = ProjectStats::default();
        for project in self.repo.list_projects(&ProjectFilter::default()) {
            *stats.by_status.entry(project.status).or_insert(0) += 1;
            *stats.by_priority.entry(project.priority).or_insert(0) += 1;
        }
        stats
    }

    pub fn task_stats(&self) -> TaskStats {
        self.latency.pause(Operation::TaskStats);
        let mut stats = TaskStats::default();
        for task in self.repo.list_tasks(&TaskFilter::default()) {
            stats.total += 1;
            stats.completed += usize::from(task.status.is_done());
            *stats.by_status.entry(task.status).or_insert(0) += 1;
            *stats.by_priority.entry(task.priority).or_insert(0) += 1;
        }
        stats.completion_rate = completion_rate(stats.completed, stats.total);
        stats
    }

    /// One entry per user in registration order, counting assigned tasks.
    pub fn team_performance(&self) -> Vec<MemberPerformance> {
        self.latency.pause(Operation::TeamPerformance);
        let tasks = self.repo.list_tasks(&TaskFilter::default());
        self.repo
            .list_users(&UserFilter::default())
            .into_iter()
            .map(|user| {
                let (assigned_tasks, completed_tasks) = tasks
                    .iter()
                    .filter(|task| task.assignee == Some(user.id))
                    .fold((0, 0), |(total, done), task| {
                        (total + 1, done + usize::from(task.status.is_done()))
                    });
                MemberPerformance {
                    user_id: user.id,
                    name: user.name,
                    assigned_tasks,
                    completed_tasks,
                    completion_rate: completion_rate(completed_tasks, assigned_tasks),
                }
            })
            .collect()
    }
}
