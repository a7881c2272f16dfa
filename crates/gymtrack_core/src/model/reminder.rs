//! Routine reminder record.
//!
//! # Invariants
//! - `frequency` is free text in storage. `daily|monthly|annual` are the
//!   values the UI offers; anything else is kept verbatim.

use super::{require_text, ReminderId, RoutineId, ValidationError};
use serde::{Deserialize, Serialize};

/// Conventional repeat cadence offered by the reminder form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFrequency {
    Daily,
    Monthly,
    Annual,
}

impl ReminderFrequency {
    /// Stored string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Parses a stored value; `None` for non-conventional strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }
}

/// Reminder attached to a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Option<ReminderId>,
    pub routine_id: RoutineId,
    /// Caller-formatted date and time.
    pub date_time: String,
    pub message: String,
    pub repeat: bool,
    pub frequency: String,
}

impl Reminder {
    pub fn new(
        routine_id: RoutineId,
        date_time: impl Into<String>,
        message: impl Into<String>,
        frequency: ReminderFrequency,
    ) -> Self {
        Self {
            id: None,
            routine_id,
            date_time: date_time.into(),
            message: message.into(),
            repeat: false,
            frequency: frequency.as_str().to_string(),
        }
    }

    /// Typed view of `frequency` when it holds a conventional value.
    pub fn known_frequency(&self) -> Option<ReminderFrequency> {
        ReminderFrequency::parse(&self.frequency)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("reminder", "date_time", &self.date_time)?;
        require_text("reminder", "message", &self.message)?;
        require_text("reminder", "frequency", &self.frequency)?;
        Ok(())
    }
}
