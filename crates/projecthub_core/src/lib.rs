//! Core data layer for ProjectHub.
//! This crate is the single source of truth for workspace records and the
//! invariants that guard them.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::activity::{
    ActivityId, ActivityItem, ActivityKind, ActivityPatch, ActivityQuery, NewActivity,
};
pub use model::common::{DateRange, ModelValidationError, Priority, Timestamp};
pub use model::project::{
    NewProject, Project, ProjectFilter, ProjectId, ProjectPatch, ProjectStatus,
};
pub use model::task::{
    Attachment, Comment, NewAttachment, NewComment, NewSubtask, NewTask, Subtask, SubtaskId,
    Task, TaskFilter, TaskId, TaskPatch, TaskStatus,
};
pub use model::user::{NewUser, User, UserFilter, UserId, UserPatch, UserRole};
pub use repo::activity_repo::ActivityRepository;
pub use repo::project_repo::ProjectRepository;
pub use repo::store::RecordStore;
pub use repo::task_repo::TaskRepository;
pub use repo::user_repo::UserRepository;
pub use repo::{RecordKind, RepoError, RepoResult};
pub use service::activity_service::ActivityService;
pub use service::board_service::{BoardColumn, BoardService};
pub use service::dashboard_service::{
    completion_rate, DashboardService, DashboardSummary, MemberPerformance, ProjectProgress,
    ProjectStats, TaskStats,
};
pub use service::latency::{LatencyProfile, Operation};
pub use service::project_service::ProjectService;
pub use service::search_service::{GlobalSearchResult, SearchService};
pub use service::task_service::TaskService;
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
