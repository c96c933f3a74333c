//! Project use-case service.
//!
//! # Responsibility
//! - Provide project CRUD entry points for view-layer callers.
//! - Apply simulated latency and emit metadata-only log events.
//! - Record a `project_created` activity for every new project.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.

use crate::model::activity::{ActivityKind, NewActivity};
use crate::model::project::{NewProject, Project, ProjectFilter, ProjectId, ProjectPatch};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoResult;
use crate::service::latency::{LatencyProfile, Operation};
use log::{debug, info, warn};

/// Use-case service wrapper for project operations.
pub struct ProjectService<'s, R: ProjectRepository + ActivityRepository> {
    repo: &'s mut R,
    latency: LatencyProfile,
}

impl<'s, R: ProjectRepository + ActivityRepository> ProjectService<'s, R> {
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

    /// Lists projects in insertion order.
    pub fn list_projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        self.latency.pause(Operation::ListProjects);
        let projects = self.repo.list_projects(filter);
        debug!(
            "event=project_list module=project_service status=ok count={}",
            projects.len()
        );
        projects
    }

    pub fn get_project(&self, id: ProjectId) -> Option<Project> {
        self.latency.pause(Operation::GetProject);
        self.repo.get_project(id)
    }

    /// Creates a project and records it in the activity feed.
    pub fn create_project(&mut self, draft: NewProject) -> RepoResult<Project> {
        self.latency.pause(Operation::CreateProject);
        let project = self.repo.create_project(draft).inspect_err(|err| {
            warn!("event=project_create module=project_service status=error error={err}");
        })?;

        self.repo.record_activity(
            NewActivity::new(ActivityKind::ProjectCreated, project.owner, "Project created")
                .describe(format!("{} was created", project.name))
                .in_project(project.id),
        )?;
        info!(
            "event=project_create module=project_service status=ok project_id={} team_size={}",
            project.id,
            project.team.len()
        );
        Ok(project)
    }

    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> RepoResult<Project> {
        self.latency.pause(Operation::UpdateProject);
        let project = self.repo.update_project(id, patch).inspect_err(|err| {
            warn!(
                "event=project_update module=project_service status=error project_id={id} error={err}"
            );
        })?;
        info!(
            "event=project_update module=project_service status=ok project_id={} status_value={:?} progress={}",
            project.id, project.status, project.progress
        );
        Ok(project)
    }

    /// Deletes a project together with its tasks.
    pub fn delete_project(&mut self, id: ProjectId) -> bool {
        self.latency.pause(Operation::DeleteProject);
        let deleted = self.repo.delete_project(id);
        info!(
            "event=project_delete module=project_service status={} project_id={id}",
            if deleted { "ok" } else { "not_found" }
        );
        deleted
    }
}
