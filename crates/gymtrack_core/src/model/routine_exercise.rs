//! Routine/exercise assignment record.

use super::{
    require_non_negative, ExerciseId, RoutineExerciseId, RoutineId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Assignment of one exercise to one routine with its volume.
///
/// The same `(routine_id, exercise_id)` pair may be assigned more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub id: Option<RoutineExerciseId>,
    pub routine_id: RoutineId,
    pub exercise_id: ExerciseId,
    pub sets: i64,
    pub reps: i64,
}

impl RoutineExercise {
    pub fn new(routine_id: RoutineId, exercise_id: ExerciseId, sets: i64, reps: i64) -> Self {
        Self {
            id: None,
            routine_id,
            exercise_id,
            sets,
            reps,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_negative("routine_exercise", "sets", self.sets)?;
        require_non_negative("routine_exercise", "reps", self.reps)?;
        Ok(())
    }
}
