//! Project repository contract and in-memory implementation.
//!
//! # Invariants
//! - New projects start `Active` with `0` progress.
//! - The owner is always the first team member unless already listed.
//! - Deleting a project deletes its tasks and scrubs them from the
//!   dependency lists of the remaining tasks.

use crate::model::common::{contains_folded, dedupe_ids, new_record_id, search_needle};
use crate::model::project::{
    NewProject, Project, ProjectFilter, ProjectId, ProjectPatch, ProjectStatus,
    DEFAULT_PROJECT_COLOR, DEFAULT_PROJECT_NAME,
};
use crate::model::user::UserId;
use crate::repo::store::RecordStore;
use crate::repo::{RecordKind, RepoError, RepoResult};
use std::collections::HashSet;

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    fn list_projects(&self, filter: &ProjectFilter) -> Vec<Project>;
    fn get_project(&self, id: ProjectId) -> Option<Project>;
    fn create_project(&mut self, draft: NewProject) -> RepoResult<Project>;
    fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> RepoResult<Project>;
    /// Returns `false` when no project has this id.
    fn delete_project(&mut self, id: ProjectId) -> bool;
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.matches_with_needle(project, search_needle(self.search.as_deref()).as_deref())
    }

    fn matches_with_needle(&self, project: &Project, needle: Option<&str>) -> bool {
        if !self.status.is_empty() && !self.status.contains(&project.status) {
            return false;
        }
        if !self.priority.is_empty() && !self.priority.contains(&project.priority) {
            return false;
        }
        if !self.member.is_empty() && !self.member.iter().any(|user| project.has_member(*user)) {
            return false;
        }
        match needle {
            Some(needle) => {
                contains_folded(&project.name, needle)
                    || contains_folded(&project.description, needle)
            }
            None => true,
        }
    }
}

impl ProjectRepository for RecordStore {
    fn list_projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        let needle = search_needle(filter.search.as_deref());
        self.projects
            .iter()
            .filter(|project| filter.matches_with_needle(project, needle.as_deref()))
            .cloned()
            .collect()
    }

    fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.projects.iter().find(|project| project.id == id).cloned()
    }

    fn create_project(&mut self, draft: NewProject) -> RepoResult<Project> {
        let owner = match draft.owner {
            Some(owner) => owner,
            None => self.current_user_id()?,
        };
        let now = self.now();
        let start_date = draft.start_date.unwrap_or(now);

        let project = Project {
            id: new_record_id(),
            name: draft
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            description: draft.description.unwrap_or_default(),
            color: draft
                .color
                .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            status: ProjectStatus::Active,
            priority: draft.priority.unwrap_or_default(),
            progress: 0,
            start_date,
            end_date: draft.end_date.unwrap_or(start_date),
            owner,
            team: team_with_owner(owner, draft.team.unwrap_or_default()),
            created_at: now,
            updated_at: now,
            template: draft.template,
        };
        project.validate()?;
        self.require_users(&project.team)?;

        self.projects.push(project.clone());
        Ok(project)
    }

    fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> RepoResult<Project> {
        let index = self.project_index(id).ok_or(RepoError::NotFound {
            kind: RecordKind::Project,
            id,
        })?;

        let mut updated = self.projects[index].clone();
        patch.apply_to(&mut updated);
        updated.team = team_with_owner(updated.owner, std::mem::take(&mut updated.team));
        updated.validate()?;
        self.require_users(&updated.team)?;
        updated.updated_at = self.touch(updated.updated_at);

        self.projects[index] = updated.clone();
        Ok(updated)
    }

    fn delete_project(&mut self, id: ProjectId) -> bool {
        let Some(index) = self.project_index(id) else {
            return false;
        };
        self.projects.remove(index);

        let removed: HashSet<_> = self
            .tasks
            .iter()
            .filter(|task| task.project_id == id)
            .map(|task| task.id)
            .collect();
        if !removed.is_empty() {
            self.tasks.retain(|task| !removed.contains(&task.id));
            for task in &mut self.tasks {
                task.dependencies.retain(|dep| !removed.contains(dep));
            }
        }
        true
    }
}

/// Deduplicated team with the owner guaranteed to be a member.
fn team_with_owner(owner: UserId, team: Vec<UserId>) -> Vec<UserId> {
    let mut team = dedupe_ids(team);
    if !team.contains(&owner) {
        team.insert(0, owner);
    }
    team
}
