//! Activity feed repository contract and in-memory implementation.
//!
//! # Invariants
//! - Feed queries are ordered by `timestamp DESC`; equal timestamps keep the
//!   later-recorded item first.
//! - The acting user and any linked project/task must exist when recorded.
//! - Items of a deleted user are removed with the user; links to deleted
//!   projects or tasks stay as history.

use crate::model::activity::{ActivityId, ActivityItem, ActivityPatch, ActivityQuery, NewActivity};
use crate::model::common::new_record_id;
use crate::repo::store::RecordStore;
use crate::repo::{RecordKind, RepoError, RepoResult};
use std::cmp::Reverse;

/// Repository interface for the activity feed.
pub trait ActivityRepository {
    fn list_activity(&self, query: &ActivityQuery) -> Vec<ActivityItem>;
    fn get_activity(&self, id: ActivityId) -> Option<ActivityItem>;
    fn record_activity(&mut self, draft: NewActivity) -> RepoResult<ActivityItem>;
    fn update_activity(&mut self, id: ActivityId, patch: ActivityPatch) -> RepoResult<ActivityItem>;
    /// Returns `false` when no item has this id.
    fn delete_activity(&mut self, id: ActivityId) -> bool;
}

impl ActivityRepository for RecordStore {
    fn list_activity(&self, query: &ActivityQuery) -> Vec<ActivityItem> {
        let mut matched: Vec<(usize, &ActivityItem)> = self
            .activity
            .iter()
            .enumerate()
            .filter(|(_, item)| query.matches(item))
            .collect();
        matched.sort_by_key(|(position, item)| (Reverse(item.timestamp), Reverse(*position)));

        let limit = query.limit.unwrap_or(matched.len());
        matched
            .into_iter()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect()
    }

    fn get_activity(&self, id: ActivityId) -> Option<ActivityItem> {
        self.activity.iter().find(|item| item.id == id).cloned()
    }

    fn record_activity(&mut self, draft: NewActivity) -> RepoResult<ActivityItem> {
        self.require_user(draft.user)?;
        if let Some(project_id) = draft.project_id {
            self.require_project(project_id)?;
        }
        if let Some(task_id) = draft.task_id {
            self.require_task(task_id)?;
        }

        let item = ActivityItem {
            id: new_record_id(),
            kind: draft.kind,
            title: draft.title,
            description: draft.description,
            user: draft.user,
            timestamp: draft.timestamp.unwrap_or_else(|| self.now()),
            project_id: draft.project_id,
            task_id: draft.task_id,
        };
        item.validate()?;

        self.activity.push(item.clone());
        Ok(item)
    }

    fn update_activity(
        &mut self,
        id: ActivityId,
        patch: ActivityPatch,
    ) -> RepoResult<ActivityItem> {
        let index = self
            .activity
            .iter()
            .position(|item| item.id == id)
            .ok_or(RepoError::NotFound {
                kind: RecordKind::Activity,
                id,
            })?;

        let mut updated = self.activity[index].clone();
        patch.apply_to(&mut updated);
        updated.validate()?;

        self.activity[index] = updated.clone();
        Ok(updated)
    }

    fn delete_activity(&mut self, id: ActivityId) -> bool {
        let before = self.activity.len();
        self.activity.retain(|item| item.id != id);
        self.activity.len() != before
    }
}
