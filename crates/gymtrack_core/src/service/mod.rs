//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate accessor calls into the operations the UI issues.
//! - Hold the only policy in the core: first-user admin and exercise
//!   permissions.
//!
//! # Invariants
//! - Services stay storage-agnostic; they only see accessor traits.
//! - A denied operation performs no accessor write.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod exercise_service;
pub mod reminder_service;
pub mod routine_exercise_service;
pub mod routine_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error.
#[derive(Debug)]
pub enum ServiceError {
    /// Acting user lacks admin or ownership rights. Message is user-facing.
    PermissionDenied(String),
    /// Login attempted while no account exists.
    NoUsersRegistered,
    /// Accessor/storage failure, propagated unchanged.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied(message) => write!(f, "{message}"),
            Self::NoUsersRegistered => write!(f, "no users are registered"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::PermissionDenied(_) | Self::NoUsersRegistered => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
