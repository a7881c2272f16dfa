//! Routine accessor contract and SQLite implementation.

use crate::model::routine::Routine;
use crate::model::{RoutineId, UserId};
use crate::repo::{bool_to_int, ensure_changed, int_to_bool, require_id, RepoResult};
use rusqlite::{params, Connection, Row};

const ROUTINE_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    name,
    description,
    day_of_week,
    completed,
    creation_date
FROM routines";

/// Accessor interface for routine persistence.
pub trait RoutineRepository {
    fn insert(&self, routine: &Routine) -> RepoResult<RoutineId>;
    fn update(&self, routine: &Routine) -> RepoResult<()>;
    fn delete(&self, routine: &Routine) -> RepoResult<()>;
    fn delete_by_id(&self, id: RoutineId) -> RepoResult<usize>;
    fn get_by_id(&self, id: RoutineId) -> RepoResult<Option<Routine>>;
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Routine>>;
}

/// SQLite-backed routine accessor.
pub struct SqliteRoutineRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoutineRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoutineRepository for SqliteRoutineRepository<'_> {
    fn insert(&self, routine: &Routine) -> RepoResult<RoutineId> {
        routine.validate()?;

        self.conn.execute(
            "INSERT INTO routines (
                user_id,
                name,
                description,
                day_of_week,
                completed,
                creation_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                routine.user_id,
                routine.name.as_str(),
                routine.description.as_deref(),
                routine.day_of_week.as_str(),
                bool_to_int(routine.completed),
                routine.creation_date.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, routine: &Routine) -> RepoResult<()> {
        let id = require_id("routine", routine.id)?;
        routine.validate()?;

        let changed = self.conn.execute(
            "UPDATE routines
             SET
                user_id = ?1,
                name = ?2,
                description = ?3,
                day_of_week = ?4,
                completed = ?5,
                creation_date = ?6
             WHERE id = ?7;",
            params![
                routine.user_id,
                routine.name.as_str(),
                routine.description.as_deref(),
                routine.day_of_week.as_str(),
                bool_to_int(routine.completed),
                routine.creation_date.as_str(),
                id,
            ],
        )?;

        ensure_changed("routine", id, changed)
    }

    fn delete(&self, routine: &Routine) -> RepoResult<()> {
        let id = require_id("routine", routine.id)?;
        let changed = self.delete_by_id(id)?;
        ensure_changed("routine", id, changed)
    }

    fn delete_by_id(&self, id: RoutineId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM routines WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_by_id(&self, id: RoutineId) -> RepoResult<Option<Routine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROUTINE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_routine_row(row)?));
        }

        Ok(None)
    }

    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Routine>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ROUTINE_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut routines = Vec::new();

        while let Some(row) = rows.next()? {
            routines.push(parse_routine_row(row)?);
        }

        Ok(routines)
    }
}

fn parse_routine_row(row: &Row<'_>) -> RepoResult<Routine> {
    Ok(Routine {
        id: Some(row.get("id")?),
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        day_of_week: row.get("day_of_week")?,
        completed: int_to_bool("routines", "completed", row.get("completed")?)?,
        creation_date: row.get("creation_date")?,
    })
}
