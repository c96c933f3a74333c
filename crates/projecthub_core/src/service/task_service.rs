//! Task use-case service.
//!
//! # Responsibility
//! - Provide task CRUD, filtering and child-record entry points.
//! - Translate task mutations into activity feed entries.
//!
//! # Invariants
//! - A status change into `done` records `task_completed`; every other
//!   successful update records `task_updated`.
//! - The acting user of an update is the assignee, else the reporter.

use crate::model::activity::{ActivityKind, NewActivity};
use crate::model::project::ProjectId;
use crate::model::task::{
    Attachment, Comment, NewAttachment, NewComment, NewSubtask, NewTask, Subtask, SubtaskId,
    Task, TaskFilter, TaskId, TaskPatch,
};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use crate::service::latency::{LatencyProfile, Operation};
use log::{debug, info, warn};

/// Use-case service wrapper for task operations.
pub struct TaskService<'s, R: TaskRepository + ActivityRepository> {
    repo: &'s mut R,
    latency: LatencyProfile,
}

impl<'s, R: TaskRepository + ActivityRepository> TaskService<'s, R> {
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

    pub fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.latency.pause(Operation::ListTasks);
        let tasks = self.repo.list_tasks(filter);
        debug!(
            "event=task_list module=task_service status=ok count={}",
            tasks.len()
        );
        tasks
    }

    pub fn list_project_tasks(&self, project_id: ProjectId) -> Vec<Task> {
        self.latency.pause(Operation::ListProjectTasks);
        self.repo.list_tasks_by_project(project_id)
    }

    pub fn get_task(&self, id: TaskId) -> Option<Task> {
        self.latency.pause(Operation::GetTask);
        self.repo.get_task(id)
    }

    pub fn create_task(&mut self, draft: NewTask) -> RepoResult<Task> {
        self.latency.pause(Operation::CreateTask);
        let task = self.repo.create_task(draft).inspect_err(|err| {
            warn!("event=task_create module=task_service status=error error={err}");
        })?;

        self.repo.record_activity(
            NewActivity::new(ActivityKind::TaskCreated, task.reporter, "Task created")
                .describe(format!("{} was added", task.title))
                .in_project(task.project_id)
                .on_task(task.id),
        )?;
        info!(
            "event=task_create module=task_service status=ok task_id={} project_id={}",
            task.id, task.project_id
        );
        Ok(task)
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        self.latency.pause(Operation::UpdateTask);
        let was_done = self.repo.get_task(id).is_some_and(|task| task.status.is_done());
        let task = self.repo.update_task(id, patch).inspect_err(|err| {
            warn!("event=task_update module=task_service status=error task_id={id} error={err}");
        })?;

        let actor = task.assignee.unwrap_or(task.reporter);
        let activity = if task.status.is_done() && !was_done {
            NewActivity::new(ActivityKind::TaskCompleted, actor, "Task completed")
                .describe(format!("{} was marked as done", task.title))
        } else {
            NewActivity::new(ActivityKind::TaskUpdated, actor, "Task updated")
                .describe(format!("{} was updated", task.title))
        };
        self.repo.record_activity(activity.in_project(task.project_id).on_task(task.id))?;
        info!(
            "event=task_update module=task_service status=ok task_id={} status_value={:?}",
            task.id, task.status
        );
        Ok(task)
    }

    pub fn delete_task(&mut self, id: TaskId) -> bool {
        self.latency.pause(Operation::DeleteTask);
        let deleted = self.repo.delete_task(id);
        info!(
            "event=task_delete module=task_service status={} task_id={id}",
            if deleted { "ok" } else { "not_found" }
        );
        deleted
    }

    pub fn add_subtask(&mut self, task_id: TaskId, draft: NewSubtask) -> RepoResult<Subtask> {
        self.latency.pause(Operation::EditTaskChildren);
        self.repo.add_subtask(task_id, draft)
    }

    pub fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        completed: bool,
    ) -> RepoResult<Subtask> {
        self.latency.pause(Operation::EditTaskChildren);
        self.repo.set_subtask_completed(task_id, subtask_id, completed)
    }

    pub fn remove_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> RepoResult<bool> {
        self.latency.pause(Operation::EditTaskChildren);
        self.repo.remove_subtask(task_id, subtask_id)
    }

    /// Adds a comment and records `comment_added` by its author.
    pub fn add_comment(&mut self, task_id: TaskId, draft: NewComment) -> RepoResult<Comment> {
        self.latency.pause(Operation::EditTaskChildren);
        let comment = self.repo.add_comment(task_id, draft).inspect_err(|err| {
            warn!(
                "event=comment_add module=task_service status=error task_id={task_id} error={err}"
            );
        })?;

        let mut activity =
            NewActivity::new(ActivityKind::CommentAdded, comment.author, "Comment added")
                .on_task(task_id);
        if let Some(task) = self.repo.get_task(task_id) {
            activity = activity
                .describe(format!("New comment on {}", task.title))
                .in_project(task.project_id);
        }
        self.repo.record_activity(activity)?;
        info!(
            "event=comment_add module=task_service status=ok task_id={task_id} mentions={}",
            comment.mentions.len()
        );
        Ok(comment)
    }

    pub fn add_attachment(
        &mut self,
        task_id: TaskId,
        draft: NewAttachment,
    ) -> RepoResult<Attachment> {
        self.latency.pause(Operation::EditTaskChildren);
        let attachment = self.repo.add_attachment(task_id, draft).inspect_err(|err| {
            warn!(
                "event=attachment_add module=task_service status=error task_id={task_id} error={err}"
            );
        })?;
        info!(
            "event=attachment_add module=task_service status=ok task_id={task_id} size={}",
            attachment.size
        );
        Ok(attachment)
    }
}
