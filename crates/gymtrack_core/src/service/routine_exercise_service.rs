//! Routine/exercise assignment service. Pure pass-through; no policy.
//!
//! Duplicate `(routine_id, exercise_id)` assignments are accepted as-is.

use crate::model::routine_exercise::RoutineExercise;
use crate::model::{ExerciseId, RoutineExerciseId, RoutineId};
use crate::repo::routine_exercise_repo::RoutineExerciseRepository;
use crate::service::ServiceResult;

pub struct RoutineExerciseService<R: RoutineExerciseRepository> {
    repo: R,
}

impl<R: RoutineExerciseRepository> RoutineExerciseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn insert(&self, assignment: &RoutineExercise) -> ServiceResult<RoutineExerciseId> {
        Ok(self.repo.insert(assignment)?)
    }

    pub fn update(&self, assignment: &RoutineExercise) -> ServiceResult<()> {
        Ok(self.repo.update(assignment)?)
    }

    pub fn delete(&self, assignment: &RoutineExercise) -> ServiceResult<()> {
        Ok(self.repo.delete(assignment)?)
    }

    pub fn delete_by_id(&self, id: RoutineExerciseId) -> ServiceResult<usize> {
        Ok(self.repo.delete_by_id(id)?)
    }

    pub fn delete_by_ids(
        &self,
        routine_id: RoutineId,
        exercise_id: ExerciseId,
    ) -> ServiceResult<usize> {
        Ok(self.repo.delete_by_ids(routine_id, exercise_id)?)
    }

    pub fn get_by_id(&self, id: RoutineExerciseId) -> ServiceResult<Option<RoutineExercise>> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn list_by_routine(&self, routine_id: RoutineId) -> ServiceResult<Vec<RoutineExercise>> {
        Ok(self.repo.list_by_routine(routine_id)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<RoutineExercise>> {
        Ok(self.repo.list_all()?)
    }
}
