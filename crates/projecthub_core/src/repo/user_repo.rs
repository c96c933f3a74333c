//! User repository contract and in-memory implementation.
//!
//! # Invariants
//! - The first registered user acts as the current user.
//! - A user referenced by any project or task cannot be deleted.
//! - Deleting a user removes the activity items that user performed, so the
//!   feed never names a missing actor.

use crate::model::common::{contains_folded, new_record_id, search_needle};
use crate::model::task::Task;
use crate::model::user::{NewUser, User, UserFilter, UserId, UserPatch};
use crate::repo::store::RecordStore;
use crate::repo::{RecordKind, RepoError, RepoResult};

/// Repository interface for team member records.
pub trait UserRepository {
    fn list_users(&self, filter: &UserFilter) -> Vec<User>;
    fn get_user(&self, id: UserId) -> Option<User>;
    /// First registered user, `None` for an empty workspace.
    fn current_user(&self) -> Option<User>;
    fn create_user(&mut self, draft: NewUser) -> RepoResult<User>;
    fn update_user(&mut self, id: UserId, patch: UserPatch) -> RepoResult<User>;
    /// Returns `Ok(false)` for unknown ids and `UserInUse` while referenced.
    /// The user's own activity items go with them.
    fn delete_user(&mut self, id: UserId) -> RepoResult<bool>;
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if !self.role.is_empty() && !self.role.contains(&user.role) {
            return false;
        }
        if let Some(online) = self.online {
            if user.is_online != online {
                return false;
            }
        }
        match search_needle(self.search.as_deref()) {
            Some(needle) => {
                contains_folded(&user.name, &needle) || contains_folded(&user.email, &needle)
            }
            None => true,
        }
    }
}

fn task_references_user(task: &Task, id: UserId) -> bool {
    task.reporter == id
        || task.assignee == Some(id)
        || task.subtasks.iter().any(|s| s.assignee == Some(id))
        || task
            .comments
            .iter()
            .any(|c| c.author == id || c.mentions.contains(&id))
        || task.attachments.iter().any(|a| a.uploaded_by == id)
}

impl UserRepository for RecordStore {
    fn list_users(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .iter()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect()
    }

    fn get_user(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn current_user(&self) -> Option<User> {
        self.users.first().cloned()
    }

    fn create_user(&mut self, draft: NewUser) -> RepoResult<User> {
        let user = User {
            id: new_record_id(),
            name: draft.name,
            email: draft.email,
            avatar: draft.avatar,
            role: draft.role.unwrap_or_default(),
            is_online: draft.is_online,
            joined_at: self.now(),
        };
        user.validate()?;

        self.users.push(user.clone());
        Ok(user)
    }

    fn update_user(&mut self, id: UserId, patch: UserPatch) -> RepoResult<User> {
        let index = self.user_index(id).ok_or(RepoError::NotFound {
            kind: RecordKind::User,
            id,
        })?;

        let mut updated = self.users[index].clone();
        patch.apply_to(&mut updated);
        updated.validate()?;

        self.users[index] = updated.clone();
        Ok(updated)
    }

    fn delete_user(&mut self, id: UserId) -> RepoResult<bool> {
        let Some(index) = self.user_index(id) else {
            return Ok(false);
        };
        let referenced = self.projects.iter().any(|project| project.has_member(id))
            || self.tasks.iter().any(|task| task_references_user(task, id));
        if referenced {
            return Err(RepoError::UserInUse(id));
        }

        self.users.remove(index);
        self.activity.retain(|item| item.user != id);
        Ok(true)
    }
}
