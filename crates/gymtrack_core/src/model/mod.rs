//! Entity records for the gym tracking core.
//!
//! # Responsibility
//! - Define the five persisted record shapes and their identities.
//! - Provide write-path validation shared by every accessor.
//!
//! # Invariants
//! - Identity is assigned by the store: unsaved records carry `id = None`.
//! - Parent references are plain integer ids; nothing cascades.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod exercise;
pub mod reminder;
pub mod routine;
pub mod routine_exercise;
pub mod user;

pub type UserId = i64;
pub type RoutineId = i64;
pub type ExerciseId = i64;
pub type RoutineExerciseId = i64;
pub type ReminderId = i64;

/// Record-level validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace only.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
    /// Count-like field holds a negative value.
    NegativeValue {
        entity: &'static str,
        field: &'static str,
        value: i64,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must not be blank")
            }
            Self::NegativeValue {
                entity,
                field,
                value,
            } => write!(f, "{entity}.{field} must not be negative, got {value}"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}

pub(crate) fn require_non_negative(
    entity: &'static str,
    field: &'static str,
    value: i64,
) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeValue {
            entity,
            field,
            value,
        });
    }
    Ok(())
}
