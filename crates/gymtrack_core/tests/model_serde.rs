use gymtrack_core::{Exercise, Reminder, ReminderFrequency, Routine, User};
use serde_json::json;

#[test]
fn user_serializes_with_snake_case_fields() {
    let mut user = User::new("Ana", "ana@gym.test", "secret", "2024-03-01");
    user.id = Some(1);
    user.is_admin = true;

    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 1,
            "name": "Ana",
            "email": "ana@gym.test",
            "password": "secret",
            "registration_date": "2024-03-01",
            "is_admin": true
        })
    );
}

#[test]
fn unsaved_records_serialize_null_id() {
    let routine = Routine::new(3, "Legs", "Friday", "2024-03-01T08:00:00");
    let value = serde_json::to_value(&routine).unwrap();
    assert_eq!(value["id"], serde_json::Value::Null);
    assert_eq!(value["completed"], json!(false));
    assert_eq!(value["description"], serde_json::Value::Null);
}

#[test]
fn exercise_and_reminder_parse_from_json() {
    let exercise: Exercise = serde_json::from_value(json!({
        "id": 5,
        "name": "Plank",
        "description": null,
        "duration_minutes": 2,
        "user_id": 1
    }))
    .unwrap();
    assert_eq!(exercise.id, Some(5));
    assert_eq!(exercise.description, None);

    let reminder: Reminder = serde_json::from_value(json!({
        "id": null,
        "routine_id": 2,
        "date_time": "4/3/2024 7:30 AM",
        "message": "Go",
        "repeat": true,
        "frequency": "monthly"
    }))
    .unwrap();
    assert_eq!(reminder.known_frequency(), Some(ReminderFrequency::Monthly));
    assert_eq!(
        serde_json::to_value(ReminderFrequency::Annual).unwrap(),
        json!("annual")
    );
}
