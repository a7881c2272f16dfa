#![allow(dead_code)]

use gymtrack_core::{
    Exercise, Reminder, ReminderFrequency, Routine, SqliteUserRepository, User, UserId,
    UserRepository,
};
use rusqlite::Connection;

pub fn user_draft(name: &str) -> User {
    User::new(
        name,
        format!("{}@gym.test", name.to_lowercase()),
        "secret",
        "2024-03-01",
    )
}

/// Inserts a user row directly with the given admin flag.
pub fn seed_user(conn: &Connection, name: &str, is_admin: bool) -> UserId {
    let mut user = user_draft(name);
    user.is_admin = is_admin;
    SqliteUserRepository::new(conn).insert(&user).unwrap()
}

pub fn routine_draft(user_id: UserId, name: &str) -> Routine {
    let mut routine = Routine::new(user_id, name, "Monday", "2024-03-01T08:00:00");
    routine.description = Some(format!("{name} session"));
    routine
}

pub fn exercise_draft(name: &str, user_id: UserId) -> Exercise {
    let mut exercise = Exercise::new(name, 20, user_id);
    exercise.description = Some(format!("{name} technique"));
    exercise
}

pub fn reminder_draft(routine_id: i64, message: &str) -> Reminder {
    let mut reminder = Reminder::new(
        routine_id,
        "4/3/2024 7:30 AM",
        message,
        ReminderFrequency::Daily,
    );
    reminder.repeat = true;
    reminder
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
