//! Serde roundtrip and JsonSchema validation for the public JSON shapes.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use evv_core::entities::{Schedule, Task};
use evv_core::enums::{ScheduleStatus, TaskStatus};
use evv_core::errors::ServiceError;
use evv_core::responses::ApiResponse;

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

fn task(status: TaskStatus, reason: Option<&str>) -> Task {
    let at = Utc.with_ymd_and_hms(2025, 6, 30, 8, 0, 0).unwrap();
    Task {
        id: "0b7e3c1e-1f2a-4c3d-8e9f-0a1b2c3d4e5f".into(),
        schedule_id: "6f1c2b9e-8a4d-4f7e-9b1a-2c3d4e5f6a7b".into(),
        description: "Assist with medication".into(),
        status,
        reason: reason.map(String::from),
        created_at: at,
        updated_at: at,
    }
}

fn schedule(status: ScheduleStatus) -> Schedule {
    let shift = Utc.with_ymd_and_hms(2025, 6, 30, 9, 0, 0).unwrap();
    Schedule {
        id: "6f1c2b9e-8a4d-4f7e-9b1a-2c3d4e5f6a7b".into(),
        client_name: "Melisa Adam".into(),
        shift_time: shift,
        location: "Casa Grande Apartment".into(),
        status,
        start_time: None,
        start_latitude: None,
        start_longitude: None,
        end_time: None,
        end_latitude: None,
        end_longitude: None,
        created_at: shift,
        updated_at: shift,
        tasks: None,
    }
}

roundtrip_and_validate!(
    upcoming_schedule_roundtrip,
    Schedule,
    schedule(ScheduleStatus::Upcoming)
);

roundtrip_and_validate!(
    completed_schedule_with_tasks_roundtrip,
    Schedule,
    {
        let mut s = schedule(ScheduleStatus::Completed);
        s.start_time = Some(s.shift_time);
        s.start_latitude = Some(37.77);
        s.start_longitude = Some(-122.41);
        s.end_time = Some(s.shift_time + chrono::Duration::hours(1));
        s.end_latitude = Some(37.78);
        s.end_longitude = Some(-122.40);
        s.with_tasks(vec![
            task(TaskStatus::Completed, None),
            task(TaskStatus::NotCompleted, Some("Client declined")),
        ])
    }
);

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    task(TaskStatus::InProgress, None)
);

roundtrip_and_validate!(
    error_envelope_roundtrip,
    ApiResponse<Task>,
    ApiResponse::error(&ServiceError::not_found("Task", "abc"))
);

#[test]
fn list_view_omits_tasks_but_keeps_null_check_in_fields() {
    let value = serde_json::to_value(schedule(ScheduleStatus::Upcoming)).unwrap();
    let obj = value.as_object().unwrap();
    assert!(!obj.contains_key("tasks"));
    assert_eq!(obj["start_time"], serde_json::Value::Null);
    assert_eq!(obj["status"], "upcoming");
}

#[test]
fn checkpoints_require_all_three_fields() {
    let mut s = schedule(ScheduleStatus::InProgress);
    s.start_time = Some(s.shift_time);
    s.start_latitude = Some(37.77);
    assert!(s.check_in().is_none());

    s.start_longitude = Some(-122.41);
    let check_in = s.check_in().unwrap();
    assert!((check_in.latitude - 37.77).abs() < f64::EPSILON);
    assert!(s.check_out().is_none());
}

#[test]
fn task_reason_omitted_when_absent() {
    let value = serde_json::to_value(task(TaskStatus::Pending, None)).unwrap();
    assert!(!value.as_object().unwrap().contains_key("reason"));
}
