//! Reminder accessor contract and SQLite implementation.

use crate::model::reminder::Reminder;
use crate::model::{ReminderId, RoutineId};
use crate::repo::{bool_to_int, ensure_changed, int_to_bool, require_id, RepoResult};
use rusqlite::{params, Connection, Row};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    routine_id,
    date_time,
    message,
    repeat,
    frequency
FROM reminders";

/// Accessor interface for reminder persistence.
pub trait ReminderRepository {
    fn insert(&self, reminder: &Reminder) -> RepoResult<ReminderId>;
    fn update(&self, reminder: &Reminder) -> RepoResult<()>;
    fn delete(&self, reminder: &Reminder) -> RepoResult<()>;
    fn delete_by_id(&self, id: ReminderId) -> RepoResult<usize>;
    fn get_by_id(&self, id: ReminderId) -> RepoResult<Option<Reminder>>;
    fn list_by_routine(&self, routine_id: RoutineId) -> RepoResult<Vec<Reminder>>;
}

/// SQLite-backed reminder accessor.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn insert(&self, reminder: &Reminder) -> RepoResult<ReminderId> {
        reminder.validate()?;

        self.conn.execute(
            "INSERT INTO reminders (routine_id, date_time, message, repeat, frequency)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reminder.routine_id,
                reminder.date_time.as_str(),
                reminder.message.as_str(),
                bool_to_int(reminder.repeat),
                reminder.frequency.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, reminder: &Reminder) -> RepoResult<()> {
        let id = require_id("reminder", reminder.id)?;
        reminder.validate()?;

        let changed = self.conn.execute(
            "UPDATE reminders
             SET
                routine_id = ?1,
                date_time = ?2,
                message = ?3,
                repeat = ?4,
                frequency = ?5
             WHERE id = ?6;",
            params![
                reminder.routine_id,
                reminder.date_time.as_str(),
                reminder.message.as_str(),
                bool_to_int(reminder.repeat),
                reminder.frequency.as_str(),
                id,
            ],
        )?;

        ensure_changed("reminder", id, changed)
    }

    fn delete(&self, reminder: &Reminder) -> RepoResult<()> {
        let id = require_id("reminder", reminder.id)?;
        let changed = self.delete_by_id(id)?;
        ensure_changed("reminder", id, changed)
    }

    fn delete_by_id(&self, id: ReminderId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_by_id(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }

        Ok(None)
    }

    fn list_by_routine(&self, routine_id: RoutineId) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REMINDER_SELECT_SQL} WHERE routine_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([routine_id])?;
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    Ok(Reminder {
        id: Some(row.get("id")?),
        routine_id: row.get("routine_id")?,
        date_time: row.get("date_time")?,
        message: row.get("message")?,
        repeat: int_to_bool("reminders", "repeat", row.get("repeat")?)?,
        frequency: row.get("frequency")?,
    })
}
