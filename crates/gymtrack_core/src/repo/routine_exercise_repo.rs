//! Routine/exercise assignment accessor and SQLite implementation.

use crate::model::routine_exercise::RoutineExercise;
use crate::model::{ExerciseId, RoutineExerciseId, RoutineId};
use crate::repo::{ensure_changed, require_id, RepoResult};
use rusqlite::{params, Connection, Row};

const ROUTINE_EXERCISE_SELECT_SQL: &str = "SELECT
    id,
    routine_id,
    exercise_id,
    sets,
    reps
FROM routine_exercises";

/// Accessor interface for routine/exercise assignments.
pub trait RoutineExerciseRepository {
    fn insert(&self, assignment: &RoutineExercise) -> RepoResult<RoutineExerciseId>;
    fn update(&self, assignment: &RoutineExercise) -> RepoResult<()>;
    fn delete(&self, assignment: &RoutineExercise) -> RepoResult<()>;
    fn delete_by_id(&self, id: RoutineExerciseId) -> RepoResult<usize>;
    /// Removes every assignment of `exercise_id` to `routine_id`.
    fn delete_by_ids(&self, routine_id: RoutineId, exercise_id: ExerciseId) -> RepoResult<usize>;
    fn get_by_id(&self, id: RoutineExerciseId) -> RepoResult<Option<RoutineExercise>>;
    fn list_by_routine(&self, routine_id: RoutineId) -> RepoResult<Vec<RoutineExercise>>;
    fn list_all(&self) -> RepoResult<Vec<RoutineExercise>>;
}

/// SQLite-backed assignment accessor.
pub struct SqliteRoutineExerciseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoutineExerciseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoutineExerciseRepository for SqliteRoutineExerciseRepository<'_> {
    fn insert(&self, assignment: &RoutineExercise) -> RepoResult<RoutineExerciseId> {
        assignment.validate()?;

        self.conn.execute(
            "INSERT INTO routine_exercises (routine_id, exercise_id, sets, reps)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                assignment.routine_id,
                assignment.exercise_id,
                assignment.sets,
                assignment.reps,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, assignment: &RoutineExercise) -> RepoResult<()> {
        let id = require_id("routine_exercise", assignment.id)?;
        assignment.validate()?;

        let changed = self.conn.execute(
            "UPDATE routine_exercises
             SET
                routine_id = ?1,
                exercise_id = ?2,
                sets = ?3,
                reps = ?4
             WHERE id = ?5;",
            params![
                assignment.routine_id,
                assignment.exercise_id,
                assignment.sets,
                assignment.reps,
                id,
            ],
        )?;

        ensure_changed("routine_exercise", id, changed)
    }

    fn delete(&self, assignment: &RoutineExercise) -> RepoResult<()> {
        let id = require_id("routine_exercise", assignment.id)?;
        let changed = self.delete_by_id(id)?;
        ensure_changed("routine_exercise", id, changed)
    }

    fn delete_by_id(&self, id: RoutineExerciseId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM routine_exercises WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn delete_by_ids(&self, routine_id: RoutineId, exercise_id: ExerciseId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM routine_exercises WHERE routine_id = ?1 AND exercise_id = ?2;",
            params![routine_id, exercise_id],
        )?;
        Ok(changed)
    }

    fn get_by_id(&self, id: RoutineExerciseId) -> RepoResult<Option<RoutineExercise>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROUTINE_EXERCISE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_routine_exercise_row(row)?));
        }

        Ok(None)
    }

    fn list_by_routine(&self, routine_id: RoutineId) -> RepoResult<Vec<RoutineExercise>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ROUTINE_EXERCISE_SELECT_SQL} WHERE routine_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([routine_id])?;
        let mut assignments = Vec::new();

        while let Some(row) = rows.next()? {
            assignments.push(parse_routine_exercise_row(row)?);
        }

        Ok(assignments)
    }

    fn list_all(&self) -> RepoResult<Vec<RoutineExercise>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ROUTINE_EXERCISE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut assignments = Vec::new();

        while let Some(row) = rows.next()? {
            assignments.push(parse_routine_exercise_row(row)?);
        }

        Ok(assignments)
    }
}

fn parse_routine_exercise_row(row: &Row<'_>) -> RepoResult<RoutineExercise> {
    Ok(RoutineExercise {
        id: Some(row.get("id")?),
        routine_id: row.get("routine_id")?,
        exercise_id: row.get("exercise_id")?,
        sets: row.get("sets")?,
        reps: row.get("reps")?,
    })
}
