//! Serde roundtrip and JsonSchema validation tests for entity types.

use chrono::{NaiveDate, TimeZone, Utc};
use schemars::schema_for;
use sd_core::drafts::*;
use sd_core::entities::*;
use sd_core::enums::*;
use sd_core::estimate::StoryPoints;
use sd_core::responses::TimelineDay;
use serde_json::json;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn dev_user() -> User {
    User {
        id: 5,
        username: "dkovalenko".into(),
        first_name: "Dana".into(),
        last_name: "Kovalenko".into(),
        role: Role::Developer,
        email: None,
    }
}

fn bug(status: BugStatus) -> BugReport {
    BugReport {
        id: 31,
        title: "Login button unresponsive".into(),
        description: "Steps: open login, click twice".into(),
        status,
        priority: Priority::High,
        project: 7,
        task: Some(12),
        reporter: 9,
        reporter_details: None,
        is_resolved: Some(false),
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 3, 10, 0, 0).unwrap()),
    }
}

roundtrip_and_validate!(
    project_roundtrip,
    Project,
    Project {
        id: 7,
        name: "Apollo".into(),
        description: "Flight software".into(),
        status: ProjectStatus::Active,
        start_date: date(2024, 1, 1),
        end_date: None,
        manager: 2,
        manager_details: None,
        members: vec![5, 9],
        members_details: vec![dev_user()],
        created_at: None,
    }
);

roundtrip_and_validate!(
    sprint_roundtrip,
    Sprint,
    Sprint {
        id: 42,
        name: "Sprint 1".into(),
        goal: "Ship login".into(),
        start_date: date(2024, 1, 1),
        end_date: Some(date(2024, 1, 14)),
        is_active: true,
        project: 7,
    }
);

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: 12,
        title: "Wire login form".into(),
        description: String::new(),
        status: TaskStatus::Review,
        priority: Priority::Critical,
        story_points: StoryPoints::new(8).unwrap(),
        project: 7,
        sprint: Some(42),
        assignee: Some(5),
        assignee_details: Some(dev_user()),
        bugs: vec![bug(BugStatus::Confirmed), bug(BugStatus::Fixed)],
        due_date: Some(date(2024, 1, 12)),
        created_at: None,
        updated_at: None,
    }
);

roundtrip_and_validate!(bug_roundtrip, BugReport, bug(BugStatus::New));

roundtrip_and_validate!(
    report_roundtrip,
    Report,
    Report {
        id: 3,
        project: 7,
        report_type: ReportType::Bugs,
        data: json!({"quality": {"active_bugs": 1}}),
        created_at: None,
        is_ready: true,
        generated_by: Some(2),
    }
);

roundtrip_and_validate!(
    timeline_roundtrip,
    TimelineDay,
    TimelineDay {
        date: date(2024, 1, 3),
        tasks: Vec::new(),
        bugs: vec![bug(BugStatus::New)],
    }
);

roundtrip_and_validate!(
    new_sprint_roundtrip,
    NewSprint,
    NewSprint {
        name: "Sprint 1".into(),
        goal: String::new(),
        start_date: Some(date(2024, 1, 1)),
        end_date: Some(date(2024, 1, 14)),
        project: 7,
        is_active: false,
    }
);

#[test]
fn task_decodes_minimal_backend_payload() {
    let task: Task = serde_json::from_value(json!({
        "id": 1,
        "title": "t",
        "status": "NEW",
        "priority": "LOW",
        "story_points": 3,
        "project": 7,
        "sprint": null
    }))
    .expect("minimal task decodes");
    assert!(task.is_backlog());
    assert!(task.bugs.is_empty());
    assert!(task.due_date.is_none());
}

#[test]
fn task_keeps_due_date_and_embedded_resolution_flag() {
    let task: Task = serde_json::from_value(json!({
        "id": 1,
        "title": "t",
        "status": "TESTING",
        "priority": "LOW",
        "story_points": 3,
        "project": 7,
        "due_date": "2024-02-01",
        "bugs": [{
            "id": 4, "title": "b", "status": "FIXED", "priority": "HIGH",
            "project": 7, "reporter": 9, "is_resolved": true
        }]
    }))
    .expect("task with due date decodes");
    assert_eq!(task.due_date, Some(date(2024, 2, 1)));
    assert_eq!(task.bugs[0].is_resolved, Some(true));
}

#[test]
fn task_rejects_off_scale_story_points() {
    let result: Result<Task, _> = serde_json::from_value(json!({
        "id": 1,
        "title": "t",
        "status": "NEW",
        "priority": "LOW",
        "story_points": 4,
        "project": 7
    }));
    assert!(result.is_err());
}

#[test]
fn active_bug_count_excludes_fixed_and_closed() {
    let task = Task {
        id: 12,
        title: "t".into(),
        description: String::new(),
        status: TaskStatus::Testing,
        priority: Priority::Low,
        story_points: StoryPoints::default(),
        project: 7,
        sprint: None,
        assignee: None,
        assignee_details: None,
        bugs: vec![
            bug(BugStatus::New),
            bug(BugStatus::InProgress),
            bug(BugStatus::Fixed),
            bug(BugStatus::Closed),
        ],
        due_date: None,
        created_at: None,
        updated_at: None,
    };
    assert_eq!(task.active_bug_count(), 2);
}

#[test]
fn manager_is_implicit_member() {
    let project: Project = serde_json::from_value(json!({
        "id": 7,
        "name": "Apollo",
        "status": "ON_HOLD",
        "start_date": "2024-01-01",
        "manager": 2,
        "members": [5]
    }))
    .unwrap();
    assert!(project.has_member(2));
    assert!(project.has_member(5));
    assert!(!project.has_member(9));
}
