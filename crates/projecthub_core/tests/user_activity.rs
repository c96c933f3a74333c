use projecthub_core::{
    ActivityKind, ActivityPatch, ActivityQuery, ActivityRepository, ActivityService, ManualClock,
    ModelValidationError, NewActivity, NewProject, NewTask, NewUser, ProjectRepository,
    RecordKind, RecordStore, RepoError, TaskRepository, UserFilter, UserPatch, UserRepository,
    UserRole, UserService,
};
use uuid::Uuid;

const T0: i64 = 1_760_000_000_000;

fn empty_store() -> (RecordStore, ManualClock) {
    let clock = ManualClock::starting_at(T0);
    (RecordStore::with_clock(clock.clone()), clock)
}

#[test]
fn first_user_is_current_user() {
    let (mut store, _clock) = empty_store();
    assert_eq!(store.current_user(), None);

    let first = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com").with_role(UserRole::Admin))
        .unwrap();
    store
        .create_user(NewUser::new("Marcus Johnson", "marcus@example.com"))
        .unwrap();

    assert_eq!(store.current_user(), Some(first.clone()));
    assert_eq!(first.role, UserRole::Admin);
    assert_eq!(first.joined_at, T0);
    assert!(!first.is_online);
}

#[test]
fn create_validates_name_and_email() {
    let (mut store, _clock) = empty_store();
    let err = store
        .create_user(NewUser::new("No Email", "not-an-email"))
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(ModelValidationError::InvalidEmail(
            "not-an-email".to_string()
        ))
    );

    let err = store
        .create_user(NewUser::new(" ", "blank@example.com"))
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::Validation(ModelValidationError::BlankField("name"))
    );
    assert_eq!(store.user_count(), 0);
}

#[test]
fn update_profile_merges_fields() {
    let (mut store, _clock) = empty_store();
    let user = store
        .create_user(NewUser {
            avatar: Some("https://cdn.example.com/a.png".to_string()),
            ..NewUser::new("Elena", "elena@example.com")
        })
        .unwrap();

    let updated = store
        .update_user(
            user.id,
            UserPatch {
                name: Some("Elena Rodriguez".to_string()),
                avatar: Some(None),
                is_online: Some(true),
                ..UserPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Elena Rodriguez");
    assert_eq!(updated.email, "elena@example.com");
    assert_eq!(updated.avatar, None);
    assert!(updated.is_online);
    assert_eq!(store.get_user(user.id), Some(updated));

    let err = store
        .update_user(Uuid::now_v7(), UserPatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn list_users_filters_by_role_presence_and_text() {
    let (mut store, _clock) = empty_store();
    let admin = store
        .create_user(NewUser {
            is_online: true,
            ..NewUser::new("Sarah Chen", "sarah@example.com").with_role(UserRole::Admin)
        })
        .unwrap();
    let viewer = store
        .create_user(NewUser::new("David Kim", "dkim@example.com").with_role(UserRole::Viewer))
        .unwrap();

    let online_admins = store.list_users(&UserFilter {
        role: vec![UserRole::Admin],
        online: Some(true),
        ..UserFilter::default()
    });
    assert_eq!(online_admins, vec![admin]);

    let by_email = store.list_users(&UserFilter {
        search: Some("DKIM@".to_string()),
        ..UserFilter::default()
    });
    assert_eq!(by_email, vec![viewer]);
}

#[test]
fn delete_user_is_rejected_while_referenced() {
    let (mut store, _clock) = empty_store();
    let owner = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let helper = store
        .create_user(NewUser::new("Marcus Johnson", "marcus@example.com"))
        .unwrap();
    let project = store.create_project(NewProject::named("Busy")).unwrap();
    let task = store
        .create_task(NewTask {
            assignee: Some(helper.id),
            ..NewTask::new(project.id, "assigned")
        })
        .unwrap();

    assert_eq!(store.delete_user(owner.id), Err(RepoError::UserInUse(owner.id)));
    assert_eq!(
        store.delete_user(helper.id),
        Err(RepoError::UserInUse(helper.id))
    );

    assert!(store.delete_task(task.id));
    assert_eq!(store.delete_user(helper.id), Ok(true));
    assert_eq!(store.get_user(helper.id), None);
    assert_eq!(store.delete_user(helper.id), Ok(false));
}

#[test]
fn user_service_records_join_activity() {
    let (mut store, _clock) = empty_store();
    let user = {
        let mut service = UserService::new(&mut store);
        let user = service
            .create_user(NewUser::new("David Kim", "david@example.com"))
            .unwrap();
        assert_eq!(service.current_user(), Some(user.clone()));
        user
    };

    let feed = ActivityService::new(&store).recent(None);
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, ActivityKind::UserJoined);
    assert_eq!(feed[0].user, user.id);
    assert_eq!(feed[0].project_id, None);
}

#[test]
fn deleting_a_user_removes_their_activity() {
    let (mut store, _clock) = empty_store();
    let (admin, guest) = {
        let mut service = UserService::new(&mut store);
        let admin = service
            .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
            .unwrap();
        let guest = service
            .create_user(NewUser::new("David Kim", "david@example.com"))
            .unwrap();
        (admin, guest)
    };
    assert_eq!(store.activity_count(), 2);

    assert_eq!(store.delete_user(guest.id), Ok(true));

    let feed = store.list_activity(&ActivityQuery::default());
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].user, admin.id);
    assert!(feed.iter().all(|item| store.get_user(item.user).is_some()));
}

#[test]
fn activity_is_newest_first_and_limited() {
    let (mut store, clock) = empty_store();
    let user = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();

    let mut recorded = Vec::new();
    for offset in [300, 100, 200] {
        recorded.push(
            store
                .record_activity(NewActivity {
                    timestamp: Some(T0 + offset),
                    ..NewActivity::new(ActivityKind::TaskUpdated, user.id, format!("at {offset}"))
                })
                .unwrap(),
        );
    }
    clock.advance(1_000);
    let latest = store
        .record_activity(NewActivity::new(
            ActivityKind::CommentAdded,
            user.id,
            "clock stamped",
        ))
        .unwrap();
    assert_eq!(latest.timestamp, T0 + 1_000);

    let feed = store.list_activity(&ActivityQuery::recent(3));
    let titles: Vec<_> = feed.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["clock stamped", "at 300", "at 200"]);

    let all = store.list_activity(&ActivityQuery::default());
    assert_eq!(all.len(), 4);
    assert_eq!(all.last().map(|item| item.id), Some(recorded[1].id));
}

#[test]
fn equal_timestamps_keep_latest_recorded_first() {
    let (mut store, _clock) = empty_store();
    let user = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let first = store
        .record_activity(NewActivity::new(ActivityKind::TaskCreated, user.id, "first"))
        .unwrap();
    let second = store
        .record_activity(NewActivity::new(ActivityKind::TaskUpdated, user.id, "second"))
        .unwrap();

    let ids: Vec<_> = store
        .list_activity(&ActivityQuery::default())
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn project_feed_is_scoped_and_defaults_to_twenty() {
    let (mut store, _clock) = empty_store();
    let user = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let project = store.create_project(NewProject::named("Feed")).unwrap();
    let other = store.create_project(NewProject::named("Other")).unwrap();

    for index in 0..25 {
        store
            .record_activity(
                NewActivity::new(ActivityKind::TaskUpdated, user.id, format!("event {index}"))
                    .in_project(project.id),
            )
            .unwrap();
    }
    store
        .record_activity(
            NewActivity::new(ActivityKind::TaskUpdated, user.id, "elsewhere").in_project(other.id),
        )
        .unwrap();

    let service = ActivityService::new(&store);
    let feed = service.for_project(project.id, None);
    assert_eq!(feed.len(), 20);
    assert!(feed.iter().all(|item| item.project_id == Some(project.id)));
    assert_eq!(service.for_project(other.id, Some(5)).len(), 1);
    assert_eq!(service.recent(None).len(), 10);
}

#[test]
fn activity_update_and_delete() {
    let (mut store, _clock) = empty_store();
    let user = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let item = store
        .record_activity(NewActivity::new(ActivityKind::TaskCreated, user.id, "draft"))
        .unwrap();

    let updated = store
        .update_activity(
            item.id,
            ActivityPatch {
                description: Some("expanded".to_string()),
                ..ActivityPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "draft");
    assert_eq!(updated.description, "expanded");
    assert_eq!(store.get_activity(item.id), Some(updated));

    assert!(store.delete_activity(item.id));
    assert!(!store.delete_activity(item.id));
    assert_eq!(store.get_activity(item.id), None);
    assert_eq!(
        store.update_activity(item.id, ActivityPatch::default()),
        Err(RepoError::NotFound {
            kind: RecordKind::Activity,
            id: item.id
        })
    );
}

#[test]
fn record_activity_checks_references() {
    let (mut store, _clock) = empty_store();
    let user = store
        .create_user(NewUser::new("Sarah Chen", "sarah@example.com"))
        .unwrap();
    let missing = Uuid::now_v7();

    let err = store
        .record_activity(
            NewActivity::new(ActivityKind::TaskCreated, user.id, "dangling").on_task(missing),
        )
        .unwrap_err();
    assert_eq!(
        err,
        RepoError::UnknownReference {
            kind: RecordKind::Task,
            id: missing
        }
    );
    assert_eq!(store.activity_count(), 0);
}
