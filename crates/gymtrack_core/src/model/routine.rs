//! Workout routine record.

use super::{require_text, RoutineId, UserId, ValidationError};
use serde::{Deserialize, Serialize};

/// Routine planned by one user for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub id: Option<RoutineId>,
    /// Owner. Expected to reference an existing user; not enforced by storage.
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Day label chosen in the UI (weekday name or formatted date).
    pub day_of_week: String,
    pub completed: bool,
    pub creation_date: String,
}

impl Routine {
    /// Creates an unsaved, not-yet-completed routine draft.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        day_of_week: impl Into<String>,
        creation_date: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            name: name.into(),
            description: None,
            day_of_week: day_of_week.into(),
            completed: false,
            creation_date: creation_date.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("routine", "name", &self.name)?;
        require_text("routine", "day_of_week", &self.day_of_week)?;
        Ok(())
    }
}
