//! Team member use-case service.

use crate::model::activity::{ActivityKind, NewActivity};
use crate::model::user::{NewUser, User, UserFilter, UserId, UserPatch};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;
use crate::service::latency::{LatencyProfile, Operation};
use log::{info, warn};

pub struct UserService<'s, R: UserRepository + ActivityRepository> {
    repo: &'s mut R,
    latency: LatencyProfile,
}

impl<'s, R: UserRepository + ActivityRepository> UserService<'s, R> {
    pub fn new(repo: &'s mut R) -> Self {
        Self {
            repo,
            latency: LatencyProfile::none(),
        }
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn list_users(&self, filter: &UserFilter) -> Vec<User> {
        self.latency.pause(Operation::ListUsers);
        self.repo.list_users(filter)
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.latency.pause(Operation::GetUser);
        self.repo.get_user(id)
    }

    pub fn current_user(&self) -> Option<User> {
        self.latency.pause(Operation::CurrentUser);
        self.repo.current_user()
    }

    /// Registers a user and records `user_joined`.
    pub fn create_user(&mut self, draft: NewUser) -> RepoResult<User> {
        self.latency.pause(Operation::CreateUser);
        let user = self.repo.create_user(draft).inspect_err(|err| {
            warn!("event=user_create module=user_service status=error error={err}");
        })?;

        self.repo.record_activity(
            NewActivity::new(ActivityKind::UserJoined, user.id, "User joined")
                .describe(format!("{} joined the team", user.name)),
        )?;
        info!(
            "event=user_create module=user_service status=ok user_id={} role={:?}",
            user.id, user.role
        );
        Ok(user)
    }

    pub fn update_profile(&mut self, id: UserId, patch: UserPatch) -> RepoResult<User> {
        self.latency.pause(Operation::UpdateUser);
        let user = self.repo.update_user(id, patch).inspect_err(|err| {
            warn!("event=user_update module=user_service status=error user_id={id} error={err}");
        })?;
        info!("event=user_update module=user_service status=ok user_id={id}");
        Ok(user)
    }

    pub fn delete_user(&mut self, id: UserId) -> RepoResult<bool> {
        self.latency.pause(Operation::DeleteUser);
        let deleted = self.repo.delete_user(id).inspect_err(|err| {
            warn!("event=user_delete module=user_service status=error user_id={id} error={err}");
        })?;
        info!(
            "event=user_delete module=user_service status={} user_id={id}",
            if deleted { "ok" } else { "not_found" }
        );
        Ok(deleted)
    }
}
