//! Core domain logic for GymTrack.
//! This crate is the single source of truth for the admin and exercise
//! permission rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LogLevel,
};
pub use model::exercise::Exercise;
pub use model::reminder::{Reminder, ReminderFrequency};
pub use model::routine::Routine;
pub use model::routine_exercise::RoutineExercise;
pub use model::user::User;
pub use model::{ExerciseId, ReminderId, RoutineExerciseId, RoutineId, UserId, ValidationError};
pub use repo::exercise_repo::{ExerciseRepository, SqliteExerciseRepository};
pub use repo::reminder_repo::{ReminderRepository, SqliteReminderRepository};
pub use repo::routine_exercise_repo::{RoutineExerciseRepository, SqliteRoutineExerciseRepository};
pub use repo::routine_repo::{RoutineRepository, SqliteRoutineRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::exercise_service::ExerciseService;
pub use service::reminder_service::ReminderService;
pub use service::routine_exercise_service::RoutineExerciseService;
pub use service::routine_service::RoutineService;
pub use service::user_service::UserService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
