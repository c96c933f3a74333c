//! Task repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over tasks.
//! - Own edits to the child collections (subtasks, comments, attachments).
//!
//! # Invariants
//! - `project_id` references an existing project on every write.
//! - Reporter, assignee, authors and mentions reference existing users.
//! - Every dependency references an existing task other than itself.
//! - Child edits refresh the parent task's `updated_at`.
//! - Deleting a task scrubs it from other tasks' dependency lists.

use crate::model::common::{
    contains_folded, dedupe_ids, dedupe_tags, new_record_id, require_text, search_needle, tag_key,
    ModelValidationError, Timestamp,
};
use crate::model::project::ProjectId;
use crate::model::task::{
    Attachment, Comment, NewAttachment, NewComment, NewSubtask, NewTask, Subtask, SubtaskId,
    Task, TaskFilter, TaskId, TaskPatch, DEFAULT_TASK_TITLE,
};
use crate::repo::store::RecordStore;
use crate::repo::{RecordKind, RepoError, RepoResult};

/// Repository interface for task CRUD and child-record operations.
pub trait TaskRepository {
    fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task>;
    fn list_tasks_by_project(&self, project_id: ProjectId) -> Vec<Task>;
    fn get_task(&self, id: TaskId) -> Option<Task>;
    fn create_task(&mut self, draft: NewTask) -> RepoResult<Task>;
    fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task>;
    /// Returns `false` when no task has this id.
    fn delete_task(&mut self, id: TaskId) -> bool;
    fn add_subtask(&mut self, task_id: TaskId, draft: NewSubtask) -> RepoResult<Subtask>;
    fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        completed: bool,
    ) -> RepoResult<Subtask>;
    /// Returns `Ok(false)` when the task exists but the subtask does not.
    fn remove_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> RepoResult<bool>;
    fn add_comment(&mut self, task_id: TaskId, draft: NewComment) -> RepoResult<Comment>;
    fn add_attachment(&mut self, task_id: TaskId, draft: NewAttachment) -> RepoResult<Attachment>;
}

/// Filter with its free-text and tag inputs normalized once per scan.
struct PreparedTaskFilter<'f> {
    filter: &'f TaskFilter,
    needle: Option<String>,
    tags: Vec<String>,
}

impl<'f> PreparedTaskFilter<'f> {
    fn new(filter: &'f TaskFilter) -> Self {
        Self {
            filter,
            needle: search_needle(filter.search.as_deref()),
            tags: filter.tags.iter().filter_map(|tag| tag_key(tag)).collect(),
        }
    }

    fn matches(&self, task: &Task) -> bool {
        let filter = self.filter;
        if !filter.assignee.is_empty()
            && !task
                .assignee
                .is_some_and(|assignee| filter.assignee.contains(&assignee))
        {
            return false;
        }
        if !filter.status.is_empty() && !filter.status.contains(&task.status) {
            return false;
        }
        if !filter.priority.is_empty() && !filter.priority.contains(&task.priority) {
            return false;
        }
        if !filter.project.is_empty() && !filter.project.contains(&task.project_id) {
            return false;
        }
        if let Some(needle) = self.needle.as_deref() {
            if !contains_folded(&task.title, needle) && !contains_folded(&task.description, needle)
            {
                return false;
            }
        }
        if !self.tags.is_empty()
            && !task
                .tags
                .iter()
                .filter_map(|tag| tag_key(tag))
                .any(|key| self.tags.contains(&key))
        {
            return false;
        }
        match filter.due_within {
            Some(range) => task.due_date.is_some_and(|due| range.contains(due)),
            None => true,
        }
    }
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        PreparedTaskFilter::new(self).matches(task)
    }
}

impl RecordStore {
    fn task_index_or_not_found(&self, id: TaskId) -> RepoResult<usize> {
        self.task_index(id).ok_or(RepoError::NotFound {
            kind: RecordKind::Task,
            id,
        })
    }

    /// Checks every cross-record reference a task holds.
    fn check_task_references(&self, task: &Task) -> RepoResult<()> {
        self.require_project(task.project_id)?;
        self.require_user(task.reporter)?;
        if let Some(assignee) = task.assignee {
            self.require_user(assignee)?;
        }
        task.dependencies
            .iter()
            .try_for_each(|dep| self.require_task(*dep))
    }

    fn build_attachment(&self, draft: NewAttachment, now: Timestamp) -> RepoResult<Attachment> {
        require_text("name", &draft.name)?;
        if draft.size > self.max_attachment_bytes() {
            return Err(ModelValidationError::AttachmentTooLarge {
                size: draft.size,
                max: self.max_attachment_bytes(),
            }
            .into());
        }
        self.require_user(draft.uploaded_by)?;
        Ok(Attachment {
            id: new_record_id(),
            name: draft.name,
            url: draft.url,
            mime_type: draft.mime_type,
            size: draft.size,
            uploaded_by: draft.uploaded_by,
            uploaded_at: now,
        })
    }
}

impl TaskRepository for RecordStore {
    fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        let prepared = PreparedTaskFilter::new(filter);
        self.tasks
            .iter()
            .filter(|task| prepared.matches(task))
            .cloned()
            .collect()
    }

    fn list_tasks_by_project(&self, project_id: ProjectId) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect()
    }

    fn get_task(&self, id: TaskId) -> Option<Task> {
        self.tasks.iter().find(|task| task.id == id).cloned()
    }

    fn create_task(&mut self, draft: NewTask) -> RepoResult<Task> {
        let reporter = match draft.reporter {
            Some(reporter) => reporter,
            None => self.current_user_id()?,
        };
        let now = self.now();

        let task = Task {
            id: new_record_id(),
            title: draft
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TASK_TITLE.to_string()),
            description: draft.description.unwrap_or_default(),
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            assignee: draft.assignee,
            reporter,
            project_id: draft.project_id,
            subtasks: Vec::new(),
            comments: Vec::new(),
            attachments: Vec::new(),
            tags: dedupe_tags(draft.tags),
            due_date: draft.due_date,
            estimated_hours: draft.estimated_hours,
            actual_hours: Some(0.0),
            dependencies: dedupe_ids(draft.dependencies),
            custom_fields: draft.custom_fields,
            created_at: now,
            updated_at: now,
        };
        task.validate()?;
        self.check_task_references(&task)?;

        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        let index = self.task_index_or_not_found(id)?;

        let mut updated = self.tasks[index].clone();
        patch.apply_to(&mut updated);
        updated.tags = dedupe_tags(std::mem::take(&mut updated.tags));
        updated.dependencies = dedupe_ids(std::mem::take(&mut updated.dependencies));
        updated.validate()?;
        self.check_task_references(&updated)?;
        updated.updated_at = self.touch(updated.updated_at);

        self.tasks[index] = updated.clone();
        Ok(updated)
    }

    fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.task_index(id) else {
            return false;
        };
        self.tasks.remove(index);
        for task in &mut self.tasks {
            task.dependencies.retain(|dep| *dep != id);
        }
        true
    }

    fn add_subtask(&mut self, task_id: TaskId, draft: NewSubtask) -> RepoResult<Subtask> {
        let index = self.task_index_or_not_found(task_id)?;
        require_text("title", &draft.title)?;
        if let Some(assignee) = draft.assignee {
            self.require_user(assignee)?;
        }

        let now = self.now();
        let subtask = Subtask {
            id: new_record_id(),
            title: draft.title,
            completed: false,
            assignee: draft.assignee,
            due_date: draft.due_date,
            created_at: now,
        };
        let updated_at = self.touch(self.tasks[index].updated_at);
        let task = &mut self.tasks[index];
        task.subtasks.push(subtask.clone());
        task.updated_at = updated_at;
        Ok(subtask)
    }

    fn set_subtask_completed(
        &mut self,
        task_id: TaskId,
        subtask_id: SubtaskId,
        completed: bool,
    ) -> RepoResult<Subtask> {
        let index = self.task_index_or_not_found(task_id)?;
        let updated_at = self.touch(self.tasks[index].updated_at);

        let task = &mut self.tasks[index];
        let subtask = task
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id == subtask_id)
            .ok_or(RepoError::NotFound {
                kind: RecordKind::Subtask,
                id: subtask_id,
            })?;
        subtask.completed = completed;
        let snapshot = subtask.clone();
        task.updated_at = updated_at;
        Ok(snapshot)
    }

    fn remove_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) -> RepoResult<bool> {
        let index = self.task_index_or_not_found(task_id)?;
        let updated_at = self.touch(self.tasks[index].updated_at);

        let task = &mut self.tasks[index];
        let before = task.subtasks.len();
        task.subtasks.retain(|subtask| subtask.id != subtask_id);
        if task.subtasks.len() == before {
            return Ok(false);
        }
        task.updated_at = updated_at;
        Ok(true)
    }

    fn add_comment(&mut self, task_id: TaskId, draft: NewComment) -> RepoResult<Comment> {
        let index = self.task_index_or_not_found(task_id)?;
        require_text("content", &draft.content)?;
        self.require_user(draft.author)?;
        let mentions = dedupe_ids(draft.mentions);
        self.require_users(&mentions)?;

        let now = self.now();
        let attachments = draft
            .attachments
            .into_iter()
            .map(|attachment| self.build_attachment(attachment, now))
            .collect::<RepoResult<Vec<_>>>()?;
        let comment = Comment {
            id: new_record_id(),
            content: draft.content,
            author: draft.author,
            created_at: now,
            updated_at: now,
            mentions,
            attachments,
        };

        let updated_at = self.touch(self.tasks[index].updated_at);
        let task = &mut self.tasks[index];
        task.comments.push(comment.clone());
        task.updated_at = updated_at;
        Ok(comment)
    }

    fn add_attachment(&mut self, task_id: TaskId, draft: NewAttachment) -> RepoResult<Attachment> {
        let index = self.task_index_or_not_found(task_id)?;
        let attachment = self.build_attachment(draft, self.now())?;

        let updated_at = self.touch(self.tasks[index].updated_at);
        let task = &mut self.tasks[index];
        task.attachments.push(attachment.clone());
        task.updated_at = updated_at;
        Ok(attachment)
    }
}
