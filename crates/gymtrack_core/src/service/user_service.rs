//! User use-case service.
//!
//! # Responsibility
//! - Register accounts and decide the admin flag.
//! - Check login credentials.
//!
//! # Invariants
//! - Callers cannot grant admin: the flag is always recomputed on insert.
//! - `insert` is check-then-act. Two concurrent first registrations on
//!   separate connections can both become admin. `register` is the atomic
//!   variant.

use crate::model::user::User;
use crate::model::UserId;
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Use-case service wrapper for user operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts a user, marking it admin iff no user exists yet.
    ///
    /// Reads the full user list, then inserts; the two steps are not
    /// transactional.
    ///
    /// Returns the persisted record with its id and effective admin flag.
    pub fn insert(&self, user: &User) -> ServiceResult<User> {
        let is_first = self.repo.list_all()?.is_empty();
        let mut record = user.clone();
        record.is_admin = is_first;
        let id = self.repo.insert(&record)?;
        record.id = Some(id);

        info!(
            "event=user_insert module=service status=ok user_id={} is_admin={}",
            id, record.is_admin
        );
        Ok(record)
    }

    /// Inserts a user with the first-user admin decision made atomically.
    pub fn register(&self, user: &User) -> ServiceResult<User> {
        let (id, is_admin) = self.repo.insert_granting_first_admin(user)?;
        let mut record = user.clone();
        record.id = Some(id);
        record.is_admin = is_admin;

        info!(
            "event=user_register module=service status=ok user_id={} is_admin={}",
            id, is_admin
        );
        Ok(record)
    }

    /// Finds the account matching `email` and `password` exactly.
    ///
    /// # Errors
    /// - `NoUsersRegistered` when the user table is empty.
    pub fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Option<User>> {
        let users = self.repo.list_all()?;
        if users.is_empty() {
            return Err(ServiceError::NoUsersRegistered);
        }

        let found = users
            .into_iter()
            .find(|user| user.matches_credentials(email, password));
        info!(
            "event=user_login module=service status={}",
            if found.is_some() { "ok" } else { "denied" }
        );
        Ok(found)
    }

    /// Returns whether `user_id` exists and holds the admin flag.
    pub fn is_admin(&self, user_id: UserId) -> ServiceResult<bool> {
        Ok(self
            .repo
            .get_by_id(user_id)?
            .is_some_and(|user| user.is_admin))
    }

    pub fn update(&self, user: &User) -> ServiceResult<()> {
        Ok(self.repo.update(user)?)
    }

    pub fn delete(&self, user: &User) -> ServiceResult<()> {
        Ok(self.repo.delete(user)?)
    }

    pub fn delete_by_id(&self, id: UserId) -> ServiceResult<usize> {
        Ok(self.repo.delete_by_id(id)?)
    }

    pub fn get_by_id(&self, id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.repo.get_by_id(id)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.list_all()?)
    }
}
