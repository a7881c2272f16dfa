//! Exercise accessor contract and SQLite implementation.
//!
//! # Invariants
//! - Accessors never check permissions; the exercise service does.

use crate::model::exercise::Exercise;
use crate::model::{ExerciseId, UserId};
use crate::repo::{ensure_changed, require_id, RepoResult};
use rusqlite::{params, Connection, Row};

const EXERCISE_SELECT_SQL: &str = "SELECT
    e.id,
    e.name,
    e.description,
    e.duration_minutes,
    e.user_id
FROM exercises AS e";

/// Accessor interface for exercise persistence.
pub trait ExerciseRepository {
    fn insert(&self, exercise: &Exercise) -> RepoResult<ExerciseId>;
    fn update(&self, exercise: &Exercise) -> RepoResult<()>;
    fn delete(&self, exercise: &Exercise) -> RepoResult<()>;
    fn delete_by_id(&self, id: ExerciseId) -> RepoResult<usize>;
    /// Deletes `id` only when it was created by `user_id`.
    fn delete_by_id_for_user(&self, id: ExerciseId, user_id: UserId) -> RepoResult<usize>;
    fn get_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>>;
    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Exercise>>;
    /// Exercises whose creator currently holds the admin flag.
    fn list_created_by_admins(&self) -> RepoResult<Vec<Exercise>>;
    fn list_all(&self) -> RepoResult<Vec<Exercise>>;
}

/// SQLite-backed exercise accessor.
pub struct SqliteExerciseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExerciseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_list(&self, sql: &str, bind: Option<i64>) -> RepoResult<Vec<Exercise>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match bind {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };
        let mut exercises = Vec::new();

        while let Some(row) = rows.next()? {
            exercises.push(parse_exercise_row(row)?);
        }

        Ok(exercises)
    }
}

impl ExerciseRepository for SqliteExerciseRepository<'_> {
    fn insert(&self, exercise: &Exercise) -> RepoResult<ExerciseId> {
        exercise.validate()?;

        self.conn.execute(
            "INSERT INTO exercises (name, description, duration_minutes, user_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                exercise.name.as_str(),
                exercise.description.as_deref(),
                exercise.duration_minutes,
                exercise.user_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, exercise: &Exercise) -> RepoResult<()> {
        let id = require_id("exercise", exercise.id)?;
        exercise.validate()?;

        let changed = self.conn.execute(
            "UPDATE exercises
             SET
                name = ?1,
                description = ?2,
                duration_minutes = ?3,
                user_id = ?4
             WHERE id = ?5;",
            params![
                exercise.name.as_str(),
                exercise.description.as_deref(),
                exercise.duration_minutes,
                exercise.user_id,
                id,
            ],
        )?;

        ensure_changed("exercise", id, changed)
    }

    fn delete(&self, exercise: &Exercise) -> RepoResult<()> {
        let id = require_id("exercise", exercise.id)?;
        let changed = self
            .conn
            .execute("DELETE FROM exercises WHERE id = ?1;", [id])?;
        ensure_changed("exercise", id, changed)
    }

    fn delete_by_id(&self, id: ExerciseId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM exercises WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn delete_by_id_for_user(&self, id: ExerciseId, user_id: UserId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM exercises WHERE id = ?1 AND user_id = ?2;",
            params![id, user_id],
        )?;
        Ok(changed)
    }

    fn get_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXERCISE_SELECT_SQL} WHERE e.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_exercise_row(row)?));
        }

        Ok(None)
    }

    fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Exercise>> {
        self.query_list(
            &format!("{EXERCISE_SELECT_SQL} WHERE e.user_id = ?1 ORDER BY e.id ASC;"),
            Some(user_id),
        )
    }

    fn list_created_by_admins(&self) -> RepoResult<Vec<Exercise>> {
        self.query_list(
            &format!(
                "{EXERCISE_SELECT_SQL}
                 JOIN users AS u ON u.id = e.user_id
                 WHERE u.is_admin = 1
                 ORDER BY e.id ASC;"
            ),
            None,
        )
    }

    fn list_all(&self) -> RepoResult<Vec<Exercise>> {
        self.query_list(&format!("{EXERCISE_SELECT_SQL} ORDER BY e.id ASC;"), None)
    }
}

fn parse_exercise_row(row: &Row<'_>) -> RepoResult<Exercise> {
    Ok(Exercise {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        duration_minutes: row.get("duration_minutes")?,
        user_id: row.get("user_id")?,
    })
}
