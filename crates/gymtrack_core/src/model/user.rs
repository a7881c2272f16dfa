//! User account record.

use super::{require_text, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Registered account.
///
/// `is_admin` is decided by the user service at registration time; callers
/// constructing a draft cannot grant it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    /// Stored as entered. The mobile login compares it verbatim.
    pub password: String,
    /// Caller-formatted registration date.
    pub registration_date: String,
    pub is_admin: bool,
}

impl User {
    /// Creates an unsaved, non-admin user draft.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        registration_date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            registration_date: registration_date.into(),
            is_admin: false,
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - Returns `BlankField` for an empty name, email or password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("user", "name", &self.name)?;
        require_text("user", "email", &self.email)?;
        require_text("user", "password", &self.password)?;
        Ok(())
    }

    /// Returns whether `email`/`password` match this account exactly.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
