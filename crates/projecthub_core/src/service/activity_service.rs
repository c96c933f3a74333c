//! Activity feed read service.

use crate::model::activity::{
    ActivityItem, ActivityQuery, DEFAULT_PROJECT_ACTIVITY_LIMIT, DEFAULT_RECENT_ACTIVITY_LIMIT,
};
use crate::model::project::ProjectId;
use crate::repo::activity_repo::ActivityRepository;
use crate::service::latency::{LatencyProfile, Operation};

pub struct ActivityService<'s, R: ActivityRepository> {
    repo: &'s R,
    latency: LatencyProfile,
}

impl<'s, R: ActivityRepository> ActivityService<'s, R> {
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

    /// Newest workspace activity; `None` means the default limit of 10.
    pub fn recent(&self, limit: Option<usize>) -> Vec<ActivityItem> {
        self.latency.pause(Operation::RecentActivity);
        self.repo.list_activity(&ActivityQuery::recent(
            limit.unwrap_or(DEFAULT_RECENT_ACTIVITY_LIMIT),
        ))
    }

    /// Newest activity of one project; `None` means the default limit of 20.
    pub fn for_project(&self, project_id: ProjectId, limit: Option<usize>) -> Vec<ActivityItem> {
        self.latency.pause(Operation::ProjectActivity);
        self.repo.list_activity(&ActivityQuery::for_project(
            project_id,
            limit.unwrap_or(DEFAULT_PROJECT_ACTIVITY_LIMIT),
        ))
    }

    pub fn query(&self, query: &ActivityQuery) -> Vec<ActivityItem> {
        self.latency.pause(Operation::RecentActivity);
        self.repo.list_activity(query)
    }
}
