//! Demo workspace fixture.
//!
//! Populates a store with a small, consistent team/project/task set through
//! the public repository contracts, so seeded data obeys every write
//! invariant. Dates are relative to the store clock.

use crate::clock::Clock;
use crate::model::activity::{ActivityKind, NewActivity};
use crate::model::common::Priority;
use crate::model::project::{NewProject, ProjectPatch, ProjectStatus};
use crate::model::task::{NewSubtask, NewTask, TaskStatus};
use crate::model::user::{NewUser, UserRole};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::store::RecordStore;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

impl RecordStore {
    /// Creates a store on `clock` pre-populated with the demo workspace.
    pub fn with_demo_data(clock: impl Clock + 'static) -> RepoResult<Self> {
        let mut store = Self::with_clock(clock);
        seed_demo_data(&mut store)?;
        Ok(store)
    }
}

/// Appends the demo users, projects, tasks and activity to `store`.
pub fn seed_demo_data(store: &mut RecordStore) -> RepoResult<()> {
    let now = store.now();

    let sarah = store.create_user(NewUser {
        is_online: true,
        ..NewUser::new("Sarah Chen", "sarah.chen@projecthub.dev").with_role(UserRole::Admin)
    })?;
    let marcus = store.create_user(NewUser {
        is_online: true,
        ..NewUser::new("Marcus Johnson", "marcus.j@projecthub.dev")
    })?;
    let elena = store.create_user(NewUser::new("Elena Rodriguez", "elena.r@projecthub.dev"))?;
    let david = store.create_user(
        NewUser::new("David Kim", "david.kim@projecthub.dev").with_role(UserRole::Viewer),
    )?;

    let website = store.create_project(NewProject {
        name: Some("Website Redesign".to_string()),
        description: Some("Refresh the marketing site with the new brand system".to_string()),
        color: Some("#3B82F6".to_string()),
        priority: Some(Priority::High),
        start_date: Some(now - 30 * DAY_MS),
        end_date: Some(now + 30 * DAY_MS),
        owner: Some(sarah.id),
        team: Some(vec![sarah.id, marcus.id, elena.id]),
        template: Some("design".to_string()),
    })?;
    let website = store.update_project(
        website.id,
        ProjectPatch {
            progress: Some(65),
            ..ProjectPatch::default()
        },
    )?;

    let mobile = store.create_project(NewProject {
        name: Some("Mobile App Launch".to_string()),
        description: Some("Ship the first public release of the mobile client".to_string()),
        color: Some("#10B981".to_string()),
        priority: Some(Priority::Urgent),
        start_date: Some(now - 14 * DAY_MS),
        end_date: Some(now + 45 * DAY_MS),
        owner: Some(marcus.id),
        team: Some(vec![marcus.id, elena.id, david.id]),
        template: Some("development".to_string()),
    })?;
    let mobile = store.update_project(
        mobile.id,
        ProjectPatch {
            progress: Some(30),
            ..ProjectPatch::default()
        },
    )?;

    let campaign = store.create_project(NewProject {
        name: Some("Q3 Marketing Campaign".to_string()),
        description: Some("Coordinated launch campaign across channels".to_string()),
        color: Some("#F59E0B".to_string()),
        priority: Some(Priority::Medium),
        start_date: Some(now - 90 * DAY_MS),
        end_date: Some(now - 10 * DAY_MS),
        owner: Some(elena.id),
        team: Some(vec![elena.id, sarah.id]),
        template: Some("marketing".to_string()),
    })?;
    store.update_project(
        campaign.id,
        ProjectPatch {
            status: Some(ProjectStatus::Completed),
            progress: Some(100),
            ..ProjectPatch::default()
        },
    )?;

    let wireframes = store.create_task(NewTask {
        description: Some("Low-fidelity layouts for home, pricing and blog".to_string()),
        status: Some(TaskStatus::Done),
        priority: Some(Priority::High),
        assignee: Some(elena.id),
        reporter: Some(sarah.id),
        tags: vec!["design".to_string(), "ux".to_string()],
        estimated_hours: Some(16.0),
        ..NewTask::new(website.id, "Create wireframes")
    })?;
    let homepage = store.create_task(NewTask {
        description: Some("Build the responsive homepage from approved mocks".to_string()),
        status: Some(TaskStatus::InProgress),
        priority: Some(Priority::High),
        assignee: Some(marcus.id),
        reporter: Some(sarah.id),
        tags: vec!["frontend".to_string()],
        due_date: Some(now + 3 * DAY_MS),
        estimated_hours: Some(24.0),
        dependencies: vec![wireframes.id],
        ..NewTask::new(website.id, "Implement homepage")
    })?;
    store.add_subtask(homepage.id, NewSubtask::titled("Hero section"))?;
    let nav = store.add_subtask(homepage.id, NewSubtask::titled("Navigation bar"))?;
    store.set_subtask_completed(homepage.id, nav.id, true)?;

    store.create_task(NewTask {
        description: Some("Audit color contrast and keyboard navigation".to_string()),
        status: Some(TaskStatus::Review),
        assignee: Some(elena.id),
        reporter: Some(marcus.id),
        tags: vec!["accessibility".to_string(), "frontend".to_string()],
        due_date: Some(now + DAY_MS),
        ..NewTask::new(website.id, "Accessibility review")
    })?;
    let auth = store.create_task(NewTask {
        description: Some("Email and OAuth sign-in for the mobile client".to_string()),
        priority: Some(Priority::Urgent),
        assignee: Some(marcus.id),
        reporter: Some(marcus.id),
        tags: vec!["backend".to_string(), "auth".to_string()],
        due_date: Some(now + 7 * DAY_MS),
        estimated_hours: Some(32.0),
        ..NewTask::new(mobile.id, "User authentication")
    })?;
    store.create_task(NewTask {
        description: Some("Prepare screenshots and listing copy".to_string()),
        priority: Some(Priority::Low),
        reporter: Some(david.id),
        tags: vec!["release".to_string()],
        due_date: Some(now + 20 * DAY_MS),
        ..NewTask::new(mobile.id, "App store listing")
    })?;

    store.record_activity(
        NewActivity::new(ActivityKind::ProjectCreated, marcus.id, "Project created")
            .describe("Mobile App Launch was created")
            .in_project(mobile.id),
    )?;
    store.record_activity(
        NewActivity::new(ActivityKind::TaskCompleted, elena.id, "Task completed")
            .describe("Create wireframes was marked as done")
            .in_project(website.id)
            .on_task(wireframes.id),
    )?;
    store.record_activity(
        NewActivity::new(ActivityKind::TaskCreated, marcus.id, "Task created")
            .describe("User authentication was added")
            .in_project(mobile.id)
            .on_task(auth.id),
    )?;
    store.record_activity(
        NewActivity::new(ActivityKind::UserJoined, david.id, "User joined")
            .describe("David Kim joined the team"),
    )?;

    Ok(())
}
