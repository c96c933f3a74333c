use projecthub_core::{
    ActivityKind, ActivityQuery, ActivityRepository, ManualClock, ModelValidationError, NewProject,
    NewTask, NewUser, Priority, ProjectFilter, ProjectPatch, ProjectRepository, ProjectService,
    ProjectStatus, RecordKind, RecordStore, RepoError, TaskPatch, TaskRepository, UserRepository,
};
use uuid::Uuid;

const T0: i64 = 1_760_000_000_000;

fn store_with_users() -> (RecordStore, ManualClock, Uuid, Uuid) {
    let clock = ManualClock::starting_at(T0);
    let mut store = RecordStore::with_clock(clock.clone());
    let owner = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let member = store
        .create_user(NewUser::new("Marcus Johnson", "marcus@example.com"))
        .unwrap();
    (store, clock, owner.id, member.id)
}

#[test]
fn create_fills_defaults_and_appears_in_list() {
    let (mut store, _clock, owner, _) = store_with_users();

    let project = store.create_project(NewProject::default()).unwrap();
    assert_eq!(project.name, "Untitled Project");
    assert_eq!(project.color, "#3B82F6");
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.priority, Priority::Medium);
    assert_eq!(project.progress, 0);
    assert_eq!(project.owner, owner);
    assert_eq!(project.team, vec![owner]);
    assert_eq!(project.created_at, T0);
    assert_eq!(project.updated_at, T0);
    assert_eq!(project.start_date, T0);
    assert_eq!(project.end_date, T0);

    let listed = store.list_projects(&ProjectFilter::default());
    assert_eq!(listed, vec![project.clone()]);
    assert_eq!(store.get_project(project.id), Some(project));
}

#[test]
fn create_assigns_unique_ids() {
    let (mut store, _clock, _, _) = store_with_users();
    let a = store.create_project(NewProject::named("A")).unwrap();
    let b = store.create_project(NewProject::named("B")).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.project_count(), 2);
}

#[test]
fn create_without_users_has_no_default_owner() {
    let mut store = RecordStore::with_clock(ManualClock::starting_at(T0));
    let err = store.create_project(NewProject::named("Orphan")).unwrap_err();
    assert_eq!(err, RepoError::NoCurrentUser);
    assert_eq!(store.project_count(), 0);
}

#[test]
fn create_rejects_unknown_team_member() {
    let (mut store, _clock, owner, _) = store_with_users();
    let stranger = Uuid::now_v7();

    let err = store
        .create_project(NewProject {
            owner: Some(owner),
            team: Some(vec![stranger]),
            ..NewProject::named("Closed")
        })
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::UnknownReference {
            kind: RecordKind::User,
            id: stranger
        }
    );
}

#[test]
fn owner_is_always_on_the_team() {
    let (mut store, _clock, owner, member) = store_with_users();
    let project = store
        .create_project(NewProject {
            owner: Some(owner),
            team: Some(vec![member, member]),
            ..NewProject::named("Team")
        })
        .unwrap();
    assert_eq!(project.team, vec![owner, member]);

    let updated = store
        .update_project(
            project.id,
            ProjectPatch {
                owner: Some(member),
                team: Some(vec![owner]),
                ..ProjectPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.team, vec![member, owner]);
}

#[test]
fn update_merges_fields_and_refreshes_timestamp() {
    let (mut store, clock, _, _) = store_with_users();
    let project = store.create_project(NewProject::named("Website")).unwrap();

    clock.advance(60_000);
    let updated = store
        .update_project(
            project.id,
            ProjectPatch {
                progress: Some(40),
                status: Some(ProjectStatus::OnHold),
                ..ProjectPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Website");
    assert_eq!(updated.progress, 40);
    assert_eq!(updated.status, ProjectStatus::OnHold);
    assert_eq!(updated.created_at, T0);
    assert_eq!(updated.updated_at, T0 + 60_000);
}

#[test]
fn update_refreshes_timestamp_even_when_clock_is_frozen() {
    let (mut store, _clock, _, _) = store_with_users();
    let project = store.create_project(NewProject::named("Frozen")).unwrap();

    let first = store
        .update_project(project.id, ProjectPatch::default())
        .unwrap();
    let second = store
        .update_project(project.id, ProjectPatch::default())
        .unwrap();
    assert!(first.updated_at > project.updated_at);
    assert!(second.updated_at > first.updated_at);
}

#[test]
fn update_unknown_id_is_not_found_and_changes_nothing() {
    let (mut store, _clock, _, _) = store_with_users();
    let project = store.create_project(NewProject::named("Keep")).unwrap();
    let before = store.list_projects(&ProjectFilter::default());

    let missing = Uuid::now_v7();
    let err = store
        .update_project(missing, ProjectPatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Project,
            id: missing
        }
    );
    assert_eq!(store.list_projects(&ProjectFilter::default()), before);
    assert_eq!(store.get_project(project.id), Some(project));
}

#[test]
fn invalid_update_leaves_project_untouched() {
    let (mut store, _clock, _, _) = store_with_users();
    let project = store
        .create_project(NewProject {
            start_date: Some(1_000),
            end_date: Some(5_000),
            ..NewProject::named("Dated")
        })
        .unwrap();

    let err = store
        .update_project(
            project.id,
            ProjectPatch {
                progress: Some(101),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(ModelValidationError::ProgressOutOfRange(101))
    );

    let err = store
        .update_project(
            project.id,
            ProjectPatch {
                end_date: Some(500),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::DateRangeReversed { .. })
    ));

    let err = store
        .update_project(
            project.id,
            ProjectPatch {
                color: Some("blue".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::InvalidColor(_))
    ));

    assert_eq!(store.get_project(project.id), Some(project));
}

#[test]
fn end_date_defaults_to_start_date() {
    let (mut store, _clock, _, _) = store_with_users();
    let future = T0 + 86_400_000;
    let project = store
        .create_project(NewProject {
            start_date: Some(future),
            ..NewProject::named("Later")
        })
        .unwrap();
    assert_eq!(project.end_date, future);
}

#[test]
fn delete_removes_project_and_cascades_to_tasks() {
    let (mut store, _clock, _, _) = store_with_users();
    let doomed = store.create_project(NewProject::named("Doomed")).unwrap();
    let kept = store.create_project(NewProject::named("Kept")).unwrap();

    let doomed_task = store.create_task(NewTask::new(doomed.id, "gone")).unwrap();
    let kept_task = store
        .create_task(NewTask {
            dependencies: vec![doomed_task.id],
            ..NewTask::new(kept.id, "stays")
        })
        .unwrap();

    assert!(store.delete_project(doomed.id));
    assert_eq!(store.get_project(doomed.id), None);
    assert_eq!(store.list_projects(&ProjectFilter::default()), vec![kept]);
    assert_eq!(store.get_task(doomed_task.id), None);

    let survivor = store.get_task(kept_task.id).unwrap();
    assert!(survivor.dependencies.is_empty());

    assert!(!store.delete_project(doomed.id));
}

#[test]
fn tasks_cannot_move_to_a_missing_project() {
    let (mut store, _clock, _, _) = store_with_users();
    let project = store.create_project(NewProject::named("Home")).unwrap();
    let task = store.create_task(NewTask::new(project.id, "stay")).unwrap();

    let nowhere = Uuid::now_v7();
    let err = store
        .update_task(
            task.id,
            TaskPatch {
                project_id: Some(nowhere),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::UnknownReference {
            kind: RecordKind::Project,
            id: nowhere
        }
    );
}

#[test]
fn filters_are_conjunctive() {
    let (mut store, _clock, owner, member) = store_with_users();
    let alpha = store
        .create_project(NewProject {
            priority: Some(Priority::High),
            description: Some("Marketing site refresh".to_string()),
            ..NewProject::named("Alpha")
        })
        .unwrap();
    let beta = store
        .create_project(NewProject {
            priority: Some(Priority::High),
            owner: Some(member),
            ..NewProject::named("Beta")
        })
        .unwrap();
    store
        .update_project(
            beta.id,
            ProjectPatch {
                status: Some(ProjectStatus::Archived),
                ..ProjectPatch::default()
            },
        )
        .unwrap();
    store.create_project(NewProject::named("Gamma")).unwrap();

    let high_active = store.list_projects(&ProjectFilter {
        status: vec![ProjectStatus::Active],
        priority: vec![Priority::High],
        ..ProjectFilter::default()
    });
    assert_eq!(high_active, vec![alpha.clone()]);

    let by_member = store.list_projects(&ProjectFilter {
        member: vec![member],
        ..ProjectFilter::default()
    });
    assert_eq!(by_member.len(), 1);
    assert_eq!(by_member[0].id, beta.id);

    let owned = store.list_projects(&ProjectFilter {
        member: vec![owner],
        ..ProjectFilter::default()
    });
    assert_eq!(owned.len(), 2);

    let searched = store.list_projects(&ProjectFilter {
        search: Some("MARKETING".to_string()),
        ..ProjectFilter::default()
    });
    assert_eq!(searched, vec![alpha]);
}

#[test]
fn service_records_project_created_activity() {
    let (mut store, _clock, owner, _) = store_with_users();

    let project = {
        let mut service = ProjectService::new(&mut store);
        let project = service.create_project(NewProject::named("Launch")).unwrap();
        assert_eq!(service.list_projects(&ProjectFilter::default()).len(), 1);
        assert_eq!(service.get_project(project.id), Some(project.clone()));
        project
    };

    let feed = store.list_activity(&ActivityQuery::for_project(project.id, 10));
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, ActivityKind::ProjectCreated);
    assert_eq!(feed[0].user, owner);
    assert!(feed[0].description.contains("Launch"));

    let mut service = ProjectService::new(&mut store);
    assert!(service.delete_project(project.id));
    assert!(!service.delete_project(project.id));
}
