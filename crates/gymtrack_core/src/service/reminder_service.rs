//! Reminder use-case service. Pure pass-through; no policy.

use crate::model::reminder::Reminder;
use crate::model::{ReminderId, RoutineId};
use crate::repo::reminder_repo::ReminderRepository;
use crate::service::ServiceResult;

pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn insert(&self, reminder: &Reminder) -> ServiceResult<ReminderId> {
        Ok(self.repo.insert(reminder)?)
    }

    pub fn update(&self, reminder: &Reminder) -> ServiceResult<()> {
        Ok(self.repo.update(reminder)?)
    }

    pub fn delete(&self, reminder: &Reminder) -> ServiceResult<()> {
        Ok(self.repo.delete(reminder)?)
    }

    pub fn delete_by_id(&self, id: ReminderId) -> ServiceResult<usize> {
        Ok(self.repo.delete_by_id(id)?)
    }

    pub fn get_by_id(&self, id: ReminderId) -> ServiceResult<Option<Reminder>> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn list_by_routine(&self, routine_id: RoutineId) -> ServiceResult<Vec<Reminder>> {
        Ok(self.repo.list_by_routine(routine_id)?)
    }
}
