//! In-memory record store.
//!
//! # Responsibility
//! - Own the four record collections for one workspace.
//! - Stamp records with time from an injected `Clock`.
//! - Answer the reference checks shared by all repository impls.
//!
//! # Invariants
//! - One store per process (or per test); nothing here is global.
//! - `touch` always yields a timestamp strictly after the previous one, so
//!   `updated_at` moves forward even when the clock does not.

use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::model::activity::ActivityItem;
use crate::model::common::Timestamp;
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskId, DEFAULT_MAX_ATTACHMENT_BYTES};
use crate::model::user::{User, UserId};
use crate::repo::{RecordKind, RepoError, RepoResult};

/// Owner of every record collection in a workspace.
#[derive(Debug)]
pub struct RecordStore {
    pub(crate) projects: Vec<Project>,
    pub(crate) tasks: Vec<Task>,
    pub(crate) users: Vec<User>,
    pub(crate) activity: Vec<ActivityItem>,
    clock: Box<dyn Clock>,
    max_attachment_bytes: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Creates an empty store on wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty store on the given clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            projects: Vec::new(),
            tasks: Vec::new(),
            users: Vec::new(),
            activity: Vec::new(),
            clock: Box::new(clock),
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }

    /// Creates an empty store honoring the limits in `config`.
    pub fn with_config(config: &CoreConfig, clock: impl Clock + 'static) -> Self {
        let mut store = Self::with_clock(clock);
        store.max_attachment_bytes = config.max_attachment_bytes;
        store
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn activity_count(&self) -> usize {
        self.activity.len()
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now_ms()
    }

    /// Next `updated_at` for a record last stamped at `previous`.
    pub(crate) fn touch(&self, previous: Timestamp) -> Timestamp {
        self.now().max(previous.saturating_add(1))
    }

    pub(crate) fn project_index(&self, id: ProjectId) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }

    pub(crate) fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub(crate) fn user_index(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }

    /// First registered user; stands in for the signed-in user.
    pub(crate) fn current_user_id(&self) -> RepoResult<UserId> {
        self.users
            .first()
            .map(|user| user.id)
            .ok_or(RepoError::NoCurrentUser)
    }

    pub(crate) fn require_user(&self, id: UserId) -> RepoResult<()> {
        match self.user_index(id) {
            Some(_) => Ok(()),
            None => Err(RepoError::UnknownReference {
                kind: RecordKind::User,
                id,
            }),
        }
    }

    pub(crate) fn require_users<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a UserId>,
    ) -> RepoResult<()> {
        ids.into_iter().try_for_each(|id| self.require_user(*id))
    }

    pub(crate) fn require_project(&self, id: ProjectId) -> RepoResult<()> {
        match self.project_index(id) {
            Some(_) => Ok(()),
            None => Err(RepoError::UnknownReference {
                kind: RecordKind::Project,
                id,
            }),
        }
    }

    pub(crate) fn require_task(&self, id: TaskId) -> RepoResult<()> {
        match self.task_index(id) {
            Some(_) => Ok(()),
            None => Err(RepoError::UnknownReference {
                kind: RecordKind::Task,
                id,
            }),
        }
    }
}

impl Clock for RecordStore {
    fn now_ms(&self) -> Timestamp {
        self.now()
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use crate::clock::ManualClock;
    use crate::repo::RepoError;

    #[test]
    fn touch_moves_forward_when_clock_stalls() {
        let clock = ManualClock::starting_at(5_000);
        let store = RecordStore::with_clock(clock.clone());

        assert_eq!(store.touch(4_000), 5_000);
        assert_eq!(store.touch(5_000), 5_001);

        clock.advance(100);
        assert_eq!(store.touch(5_001), 5_100);
    }

    #[test]
    fn empty_store_has_no_current_user() {
        let store = RecordStore::with_clock(ManualClock::starting_at(0));
        assert_eq!(store.current_user_id(), Err(RepoError::NoCurrentUser));
        assert_eq!(store.user_count(), 0);
    }
}
