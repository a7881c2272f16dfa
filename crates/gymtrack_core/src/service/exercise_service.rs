//! Exercise use-case service with permission checks.
//!
//! # Responsibility
//! - Gate exercise writes on the acting user's rights.
//! - Serve per-user and catalog exercise lists.
//!
//! # Invariants
//! - Create requires an existing admin acting user, recorded as the creator.
//! - Update/delete require an existing acting user who is admin or the
//!   stored creator of the exercise.
//! - Only admins may change the creator of record.
//! - Denied calls perform no accessor write.

use crate::model::exercise::Exercise;
use crate::model::{ExerciseId, UserId};
use crate::repo::exercise_repo::ExerciseRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{require_id, RepoError};
use crate::service::{ServiceError, ServiceResult};
use log::warn;

const CREATE_DENIED: &str = "Only administrators can create exercises.";
const UPDATE_DENIED: &str = "You do not have permission to edit this exercise.";
const DELETE_DENIED: &str = "You do not have permission to delete this exercise.";
const CREATOR_MISMATCH: &str = "Exercises must be created under the acting administrator.";
const REASSIGN_DENIED: &str = "Only administrators can change the creator of an exercise.";

/// Use-case service for exercises.
pub struct ExerciseService<E: ExerciseRepository, U: UserRepository> {
    exercises: E,
    users: U,
}

impl<E: ExerciseRepository, U: UserRepository> ExerciseService<E, U> {
    pub fn new(exercises: E, users: U) -> Self {
        Self { exercises, users }
    }

    /// Creates an exercise on behalf of `acting_user_id`.
    ///
    /// # Errors
    /// - `PermissionDenied` when the acting user is missing or not admin, or
    ///   when `exercise.user_id` names someone else.
    pub fn insert(&self, exercise: &Exercise, acting_user_id: UserId) -> ServiceResult<ExerciseId> {
        if !self.is_admin(acting_user_id)? {
            return Err(deny("create", acting_user_id, CREATE_DENIED));
        }
        if exercise.user_id != acting_user_id {
            return Err(deny("create", acting_user_id, CREATOR_MISMATCH));
        }

        Ok(self.exercises.insert(exercise)?)
    }

    /// Updates an exercise when the acting user is admin or its creator.
    pub fn update(&self, exercise: &Exercise, acting_user_id: UserId) -> ServiceResult<()> {
        self.authorize_edit(exercise, acting_user_id, "update", UPDATE_DENIED)?;
        Ok(self.exercises.update(exercise)?)
    }

    /// Deletes an exercise when the acting user is admin or its creator.
    pub fn delete(&self, exercise: &Exercise, acting_user_id: UserId) -> ServiceResult<()> {
        self.authorize_edit(exercise, acting_user_id, "delete", DELETE_DENIED)?;
        Ok(self.exercises.delete(exercise)?)
    }

    /// Deletes exercise `id` on behalf of `acting_user_id`.
    ///
    /// Admins delete any row; other users only rows they created. Returns
    /// the number of rows removed, `0` when `id` does not exist.
    ///
    /// # Errors
    /// - `PermissionDenied` when the acting user is missing, or is not admin
    ///   and `id` belongs to someone else.
    pub fn delete_by_id(&self, id: ExerciseId, acting_user_id: UserId) -> ServiceResult<usize> {
        let Some(acting) = self.users.get_by_id(acting_user_id)? else {
            return Err(deny("delete", acting_user_id, DELETE_DENIED));
        };
        if acting.is_admin {
            return Ok(self.exercises.delete_by_id(id)?);
        }

        let removed = self.exercises.delete_by_id_for_user(id, acting_user_id)?;
        if removed == 0 && self.exercises.get_by_id(id)?.is_some() {
            return Err(deny("delete", acting_user_id, DELETE_DENIED));
        }
        Ok(removed)
    }

    pub fn get_by_id(&self, id: ExerciseId) -> ServiceResult<Option<Exercise>> {
        Ok(self.exercises.get_by_id(id)?)
    }

    /// Exercises created by `user_id`.
    pub fn list_for_user(&self, user_id: UserId) -> ServiceResult<Vec<Exercise>> {
        Ok(self.exercises.list_by_user(user_id)?)
    }

    /// Exercises created by admins; visible to every user.
    pub fn list_catalog(&self) -> ServiceResult<Vec<Exercise>> {
        Ok(self.exercises.list_created_by_admins()?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<Exercise>> {
        Ok(self.exercises.list_all()?)
    }

    fn is_admin(&self, user_id: UserId) -> ServiceResult<bool> {
        Ok(self
            .users
            .get_by_id(user_id)?
            .is_some_and(|user| user.is_admin))
    }

    fn authorize_edit(
        &self,
        exercise: &Exercise,
        acting_user_id: UserId,
        action: &'static str,
        message: &'static str,
    ) -> ServiceResult<()> {
        let Some(acting) = self.users.get_by_id(acting_user_id)? else {
            return Err(deny(action, acting_user_id, message));
        };
        if acting.is_admin {
            return Ok(());
        }

        // Ownership is judged on the stored row so a caller cannot claim
        // someone else's exercise by editing `user_id` in the draft.
        let id = require_id("exercise", exercise.id)?;
        let stored = self
            .exercises
            .get_by_id(id)?
            .ok_or(RepoError::NotFound {
                entity: "exercise",
                id,
            })?;
        if stored.user_id != acting_user_id {
            return Err(deny(action, acting_user_id, message));
        }
        if action == "update" && exercise.user_id != stored.user_id {
            return Err(deny(action, acting_user_id, REASSIGN_DENIED));
        }

        Ok(())
    }
}

fn deny(action: &'static str, acting_user_id: UserId, message: &str) -> ServiceError {
    warn!(
        "event=exercise_{} module=service status=denied acting_user_id={}",
        action, acting_user_id
    );
    ServiceError::PermissionDenied(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::ExerciseService;
    use crate::model::exercise::Exercise;
    use crate::model::user::User;
    use crate::model::{ExerciseId, UserId};
    use crate::repo::exercise_repo::ExerciseRepository;
    use crate::repo::user_repo::UserRepository;
    use crate::repo::RepoResult;
    use crate::service::ServiceError;
    use std::cell::RefCell;

    /// In-memory accessor that records every write it receives.
    #[derive(Default)]
    struct RecordingExercises {
        rows: RefCell<Vec<Exercise>>,
        writes: RefCell<Vec<&'static str>>,
    }

    impl ExerciseRepository for &RecordingExercises {
        fn insert(&self, exercise: &Exercise) -> RepoResult<ExerciseId> {
            self.writes.borrow_mut().push("insert");
            let id = self.rows.borrow().len() as i64 + 1;
            let mut stored = exercise.clone();
            stored.id = Some(id);
            self.rows.borrow_mut().push(stored);
            Ok(id)
        }

        fn update(&self, _exercise: &Exercise) -> RepoResult<()> {
            self.writes.borrow_mut().push("update");
            Ok(())
        }

        fn delete(&self, _exercise: &Exercise) -> RepoResult<()> {
            self.writes.borrow_mut().push("delete");
            Ok(())
        }

        fn delete_by_id(&self, id: ExerciseId) -> RepoResult<usize> {
            self.writes.borrow_mut().push("delete_by_id");
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| row.id != Some(id));
            Ok(before - rows.len())
        }

        fn delete_by_id_for_user(&self, id: ExerciseId, user_id: UserId) -> RepoResult<usize> {
            self.writes.borrow_mut().push("delete_by_id_for_user");
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| !(row.id == Some(id) && row.user_id == user_id));
            Ok(before - rows.len())
        }

        fn get_by_id(&self, id: ExerciseId) -> RepoResult<Option<Exercise>> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .find(|row| row.id == Some(id))
                .cloned())
        }

        fn list_by_user(&self, _user_id: UserId) -> RepoResult<Vec<Exercise>> {
            Ok(Vec::new())
        }

        fn list_created_by_admins(&self) -> RepoResult<Vec<Exercise>> {
            Ok(Vec::new())
        }

        fn list_all(&self) -> RepoResult<Vec<Exercise>> {
            Ok(self.rows.borrow().clone())
        }
    }

    struct FixedUsers(Vec<User>);

    impl UserRepository for FixedUsers {
        fn insert(&self, _user: &User) -> RepoResult<UserId> {
            unreachable!("exercise service never inserts users")
        }

        fn insert_granting_first_admin(&self, _user: &User) -> RepoResult<(UserId, bool)> {
            unreachable!("exercise service never inserts users")
        }

        fn update(&self, _user: &User) -> RepoResult<()> {
            unreachable!("exercise service never updates users")
        }

        fn delete(&self, _user: &User) -> RepoResult<()> {
            unreachable!("exercise service never deletes users")
        }

        fn delete_by_id(&self, _id: UserId) -> RepoResult<usize> {
            unreachable!("exercise service never deletes users")
        }

        fn get_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
            Ok(self.0.iter().find(|user| user.id == Some(id)).cloned())
        }

        fn list_all(&self) -> RepoResult<Vec<User>> {
            Ok(self.0.clone())
        }
    }

    fn user(id: UserId, is_admin: bool) -> User {
        let mut user = User::new(format!("user{id}"), format!("u{id}@gym.test"), "pw", "2024-01-01");
        user.id = Some(id);
        user.is_admin = is_admin;
        user
    }

    #[test]
    fn non_admin_insert_is_denied_without_accessor_call() {
        let exercises = RecordingExercises::default();
        let service = ExerciseService::new(&exercises, FixedUsers(vec![user(2, false)]));

        let err = service
            .insert(&Exercise::new("squat", 10, 2), 2)
            .expect_err("non-admin must be denied");

        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert!(exercises.writes.borrow().is_empty());
    }

    #[test]
    fn unknown_acting_user_is_denied_on_insert() {
        let exercises = RecordingExercises::default();
        let service = ExerciseService::new(&exercises, FixedUsers(Vec::new()));

        let err = service
            .insert(&Exercise::new("squat", 10, 9), 9)
            .expect_err("unknown user must be denied");

        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert!(exercises.writes.borrow().is_empty());
    }

    #[test]
    fn draft_user_id_does_not_grant_ownership() {
        let exercises = RecordingExercises::default();
        let service =
            ExerciseService::new(&exercises, FixedUsers(vec![user(1, true), user(2, false)]));
        let id = service
            .insert(&Exercise::new("bench", 15, 1), 1)
            .expect("admin insert");

        let mut forged = Exercise::new("bench", 15, 2);
        forged.id = Some(id);
        let err = service
            .update(&forged, 2)
            .expect_err("stored creator is user 1");

        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert_eq!(*exercises.writes.borrow(), vec!["insert"]);
    }

    #[test]
    fn admin_cannot_record_another_user_as_creator() {
        let exercises = RecordingExercises::default();
        let service =
            ExerciseService::new(&exercises, FixedUsers(vec![user(1, true), user(2, false)]));

        let err = service
            .insert(&Exercise::new("row", 10, 2), 1)
            .expect_err("creator must be the acting admin");

        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert!(exercises.writes.borrow().is_empty());
    }

    #[test]
    fn creator_cannot_hand_exercise_to_someone_else() {
        let exercises = RecordingExercises::default();
        exercises.rows.borrow_mut().push(Exercise {
            id: Some(1),
            ..Exercise::new("lunge", 5, 2)
        });
        let service =
            ExerciseService::new(&exercises, FixedUsers(vec![user(1, true), user(2, false)]));

        let mut reassigned = Exercise::new("lunge", 5, 1);
        reassigned.id = Some(1);
        let err = service
            .update(&reassigned, 2)
            .expect_err("non-admin cannot change the creator");

        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert!(exercises.writes.borrow().is_empty());
    }

    #[test]
    fn delete_by_id_routes_on_admin_flag() {
        let exercises = RecordingExercises::default();
        let service =
            ExerciseService::new(&exercises, FixedUsers(vec![user(1, true), user(2, false)]));
        let admin_owned = service
            .insert(&Exercise::new("press", 8, 1), 1)
            .expect("admin insert");

        let err = service
            .delete_by_id(admin_owned, 2)
            .expect_err("member cannot delete admin exercise");
        assert!(matches!(err, ServiceError::PermissionDenied(_)));

        assert_eq!(service.delete_by_id(admin_owned, 1).expect("admin delete"), 1);
        assert_eq!(service.delete_by_id(admin_owned, 2).expect("already gone"), 0);
        assert_eq!(
            *exercises.writes.borrow(),
            vec![
                "insert",
                "delete_by_id_for_user",
                "delete_by_id",
                "delete_by_id_for_user"
            ]
        );
    }
}
