//! Exercise catalog record.

use super::{require_non_negative, require_text, ExerciseId, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Exercise definition. `user_id` is the creator of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Option<ExerciseId>,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub user_id: UserId,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration_minutes: i64, user_id: UserId) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            duration_minutes,
            user_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("exercise", "name", &self.name)?;
        require_non_negative("exercise", "duration_minutes", self.duration_minutes)?;
        Ok(())
    }
}
