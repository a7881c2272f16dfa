//! Routine use-case service. Pure pass-through; no policy.

use crate::model::routine::Routine;
use crate::model::{RoutineId, UserId};
use crate::repo::routine_repo::RoutineRepository;
use crate::service::ServiceResult;

pub struct RoutineService<R: RoutineRepository> {
    repo: R,
}

impl<R: RoutineRepository> RoutineService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn insert(&self, routine: &Routine) -> ServiceResult<RoutineId> {
        Ok(self.repo.insert(routine)?)
    }

    pub fn update(&self, routine: &Routine) -> ServiceResult<()> {
        Ok(self.repo.update(routine)?)
    }

    pub fn delete(&self, routine: &Routine) -> ServiceResult<()> {
        Ok(self.repo.delete(routine)?)
    }

    pub fn delete_by_id(&self, id: RoutineId) -> ServiceResult<usize> {
        Ok(self.repo.delete_by_id(id)?)
    }

    pub fn get_by_id(&self, id: RoutineId) -> ServiceResult<Option<Routine>> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn list_by_user(&self, user_id: UserId) -> ServiceResult<Vec<Routine>> {
        Ok(self.repo.list_by_user(user_id)?)
    }
}
