use projecthub_core::{
    ActivityItem, ActivityKind, ActivityQuery, ActivityRepository, ManualClock, NewAttachment,
    NewTask, Priority, ProjectRepository, ProjectStatus, RecordStore, Task, TaskFilter,
    TaskRepository, TaskStatus, UserRepository, UserRole,
};
use serde_json::json;

const T0: i64 = 1_760_000_000_000;

#[test]
fn enums_use_wire_spelling() {
    assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), "in-progress");
    assert_eq!(serde_json::to_value(ProjectStatus::OnHold).unwrap(), "on-hold");
    assert_eq!(serde_json::to_value(Priority::Medium).unwrap(), "medium");
    assert_eq!(serde_json::to_value(UserRole::Viewer).unwrap(), "viewer");
    assert_eq!(
        serde_json::to_value(ActivityKind::TaskCreated).unwrap(),
        "task_created"
    );

    let status: TaskStatus = serde_json::from_value(json!("review")).unwrap();
    assert_eq!(status, TaskStatus::Review);
    assert!(serde_json::from_value::<ProjectStatus>(json!("paused")).is_err());
}

#[test]
fn activity_kind_is_serialized_as_type() {
    let store = RecordStore::with_demo_data(ManualClock::starting_at(T0)).unwrap();
    let newest = store
        .list_activity(&ActivityQuery::recent(1))
        .pop()
        .unwrap();

    let json = serde_json::to_value(&newest).unwrap();
    assert_eq!(json["type"], "user_joined");
    assert!(json.get("kind").is_none());
    assert_eq!(json["timestamp"], T0);
    assert!(json["task_id"].is_null());

    let back: ActivityItem = serde_json::from_value(json).unwrap();
    assert_eq!(back, newest);
}

#[test]
fn task_document_carries_nested_records() {
    let mut store = RecordStore::with_demo_data(ManualClock::starting_at(T0)).unwrap();
    let uploader = store.current_user().unwrap();
    let project = store
        .list_projects(&Default::default())
        .into_iter()
        .next()
        .unwrap();

    let task = store
        .create_task(NewTask {
            tags: vec!["Wire".to_string()],
            custom_fields: [("sprint".to_string(), json!(7))].into_iter().collect(),
            ..NewTask::new(project.id, "Serialize me")
        })
        .unwrap();
    store
        .add_attachment(
            task.id,
            NewAttachment {
                name: "brief.pdf".to_string(),
                url: "https://files.example.com/brief.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size: 2_048,
                uploaded_by: uploader.id,
            },
        )
        .unwrap();
    let task = store.get_task(task.id).unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "todo");
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["tags"], json!(["Wire"]));
    assert_eq!(json["custom_fields"]["sprint"], 7);
    assert_eq!(json["actual_hours"], 0.0);
    assert!(json["due_date"].is_null());
    assert_eq!(json["attachments"][0]["type"], "application/pdf");
    assert_eq!(json["attachments"][0]["size"], 2_048);

    let back: Task = serde_json::from_value(json).unwrap();
    assert_eq!(back, task);
}

#[test]
fn listed_tasks_serialize_as_an_array() {
    let store = RecordStore::with_demo_data(ManualClock::starting_at(T0)).unwrap();
    let tasks = store.list_tasks(&TaskFilter::default());
    let json = serde_json::to_value(&tasks).unwrap();
    let titles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles.len(), 5);
    assert_eq!(titles[0], "Create wireframes");
}
