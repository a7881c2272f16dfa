//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the operations the mobile screens issue, one call per action.
//! - Translate core errors into user-displayable messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call runs against the process-wide shared store.
//! - Mutations return an envelope; screens re-issue the list call on `ok`.

use gymtrack_core::db::shared_store;
use gymtrack_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreConfig, Exercise, ExerciseService, Reminder, ReminderService, Routine, RoutineExercise,
    RoutineExerciseService, RoutineService, SqliteExerciseRepository, SqliteReminderRepository,
    SqliteRoutineExerciseRepository, SqliteRoutineRepository, SqliteUserRepository, User,
    UserService,
};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the same `level + log_dir` is accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected row, when there is one.
    pub id: Option<i64>,
    /// Human-readable result for toasts and error labels.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Account data safe to hand to the UI (no password).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registration_date: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub ok: bool,
    pub user: Option<UserSummary>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineItem {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub day_of_week: String,
    pub completed: bool,
    pub creation_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineExerciseItem {
    pub id: i64,
    pub routine_id: i64,
    pub exercise_id: i64,
    pub sets: i64,
    pub reps: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: i64,
    pub routine_id: i64,
    pub date_time: String,
    pub message: String,
    pub repeat: bool,
    pub frequency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineListResponse {
    pub ok: bool,
    pub items: Vec<RoutineItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseListResponse {
    pub ok: bool,
    pub items: Vec<ExerciseItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineExerciseListResponse {
    pub ok: bool,
    pub items: Vec<RoutineExerciseItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderListResponse {
    pub ok: bool,
    pub items: Vec<ReminderItem>,
    pub message: String,
}

/// Registers an account. The first account in an empty store becomes admin.
#[flutter_rust_bridge::frb(sync)]
pub fn register_user(
    name: String,
    email: String,
    password: String,
    registration_date: String,
) -> ActionResponse {
    let draft = User::new(name.trim(), email.trim(), password, registration_date);
    let result = with_conn(|conn| {
        UserService::new(SqliteUserRepository::new(conn))
            .register(&draft)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(user) if user.is_admin => {
            ActionResponse::success("Registered as administrator.", user.id)
        }
        Ok(user) => ActionResponse::success("Registered.", user.id),
        Err(err) => action_failure("register_user", err),
    }
}

/// Checks credentials and returns the matching account.
#[flutter_rust_bridge::frb(sync)]
pub fn login(email: String, password: String) -> LoginResponse {
    if email.trim().is_empty() || password.is_empty() {
        return LoginResponse {
            ok: false,
            user: None,
            message: "Email and password are required.".to_string(),
        };
    }

    let result = with_conn(|conn| {
        UserService::new(SqliteUserRepository::new(conn))
            .authenticate(email.trim(), &password)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(Some(user)) => LoginResponse {
            ok: true,
            user: to_user_summary(user),
            message: "Logged in.".to_string(),
        },
        Ok(None) => LoginResponse {
            ok: false,
            user: None,
            message: "Wrong email or password.".to_string(),
        },
        Err(err) => LoginResponse {
            ok: false,
            user: None,
            message: format!("login failed: {err}"),
        },
    }
}

/// Loads one account for the home screen; `None` when absent or on error.
#[flutter_rust_bridge::frb(sync)]
pub fn get_user(user_id: i64) -> Option<UserSummary> {
    let result = with_conn(|conn| {
        UserService::new(SqliteUserRepository::new(conn))
            .get_by_id(user_id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(user) => user.and_then(to_user_summary),
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op=get_user error={err}");
            None
        }
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn create_routine(
    user_id: i64,
    name: String,
    description: Option<String>,
    day_of_week: String,
    creation_date: String,
) -> ActionResponse {
    let mut routine = Routine::new(user_id, name.trim(), day_of_week, creation_date);
    routine.description = normalize_optional(description);
    mutate("create_routine", "Routine created.", |conn| {
        RoutineService::new(SqliteRoutineRepository::new(conn))
            .insert(&routine)
            .map(Some)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_routine(item: RoutineItem) -> ActionResponse {
    let routine = Routine {
        id: Some(item.id),
        user_id: item.user_id,
        name: item.name.trim().to_string(),
        description: normalize_optional(item.description),
        day_of_week: item.day_of_week,
        completed: item.completed,
        creation_date: item.creation_date,
    };
    mutate("update_routine", "Routine updated.", |conn| {
        RoutineService::new(SqliteRoutineRepository::new(conn))
            .update(&routine)
            .map(|()| routine.id)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_routine(routine_id: i64) -> ActionResponse {
    mutate("delete_routine", "Routine deleted.", |conn| {
        let removed = RoutineService::new(SqliteRoutineRepository::new(conn))
            .delete_by_id(routine_id)
            .map_err(|err| err.to_string())?;
        ensure_removed("routine", routine_id, removed)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_routines(user_id: i64) -> RoutineListResponse {
    let (ok, items, message) = list_envelope(
        "list_routines",
        with_conn(|conn| {
            RoutineService::new(SqliteRoutineRepository::new(conn))
                .list_by_user(user_id)
                .map(|routines| routines.into_iter().filter_map(to_routine_item).collect())
                .map_err(|err| err.to_string())
        }),
    );
    RoutineListResponse { ok, items, message }
}

/// Creates an exercise owned by `acting_user_id`. Admin only.
#[flutter_rust_bridge::frb(sync)]
pub fn create_exercise(
    acting_user_id: i64,
    name: String,
    description: Option<String>,
    duration_minutes: i64,
) -> ActionResponse {
    let mut exercise = Exercise::new(name.trim(), duration_minutes, acting_user_id);
    exercise.description = normalize_optional(description);
    mutate("create_exercise", "Exercise created.", |conn| {
        exercise_service(conn)
            .insert(&exercise, acting_user_id)
            .map(Some)
            .map_err(|err| err.to_string())
    })
}

/// Updates an exercise. Admins or the exercise creator only.
#[flutter_rust_bridge::frb(sync)]
pub fn update_exercise(acting_user_id: i64, item: ExerciseItem) -> ActionResponse {
    let exercise = Exercise {
        id: Some(item.id),
        name: item.name.trim().to_string(),
        description: normalize_optional(item.description),
        duration_minutes: item.duration_minutes,
        user_id: item.user_id,
    };
    mutate("update_exercise", "Exercise updated.", |conn| {
        exercise_service(conn)
            .update(&exercise, acting_user_id)
            .map(|()| exercise.id)
            .map_err(|err| err.to_string())
    })
}

/// Deletes an exercise. Admins or the exercise creator only.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_exercise(acting_user_id: i64, exercise_id: i64) -> ActionResponse {
    mutate("delete_exercise", "Exercise deleted.", |conn| {
        let removed = exercise_service(conn)
            .delete_by_id(exercise_id, acting_user_id)
            .map_err(|err| err.to_string())?;
        ensure_removed("exercise", exercise_id, removed)
    })
}

/// Exercises created by `user_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn list_exercises(user_id: i64) -> ExerciseListResponse {
    let (ok, items, message) = list_envelope(
        "list_exercises",
        with_conn(|conn| {
            exercise_service(conn)
                .list_for_user(user_id)
                .map(|items| items.into_iter().filter_map(to_exercise_item).collect())
                .map_err(|err| err.to_string())
        }),
    );
    ExerciseListResponse { ok, items, message }
}

/// Exercises created by administrators, visible to everyone.
#[flutter_rust_bridge::frb(sync)]
pub fn list_exercise_catalog() -> ExerciseListResponse {
    let (ok, items, message) = list_envelope(
        "list_exercise_catalog",
        with_conn(|conn| {
            exercise_service(conn)
                .list_catalog()
                .map(|items| items.into_iter().filter_map(to_exercise_item).collect())
                .map_err(|err| err.to_string())
        }),
    );
    ExerciseListResponse { ok, items, message }
}

#[flutter_rust_bridge::frb(sync)]
pub fn assign_exercise(routine_id: i64, exercise_id: i64, sets: i64, reps: i64) -> ActionResponse {
    let assignment = RoutineExercise::new(routine_id, exercise_id, sets, reps);
    mutate("assign_exercise", "Exercise added to routine.", |conn| {
        RoutineExerciseService::new(SqliteRoutineExerciseRepository::new(conn))
            .insert(&assignment)
            .map(Some)
            .map_err(|err| err.to_string())
    })
}

/// Removes every assignment of `exercise_id` from `routine_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_routine_exercise(routine_id: i64, exercise_id: i64) -> ActionResponse {
    mutate(
        "remove_routine_exercise",
        "Exercise removed from routine.",
        |conn| {
            let removed = RoutineExerciseService::new(SqliteRoutineExerciseRepository::new(conn))
                .delete_by_ids(routine_id, exercise_id)
                .map_err(|err| err.to_string())?;
            if removed == 0 {
                return Err(format!(
                    "exercise {exercise_id} is not assigned to routine {routine_id}"
                ));
            }
            Ok(None)
        },
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_routine_exercises(routine_id: i64) -> RoutineExerciseListResponse {
    let (ok, items, message) = list_envelope(
        "list_routine_exercises",
        with_conn(|conn| {
            RoutineExerciseService::new(SqliteRoutineExerciseRepository::new(conn))
                .list_by_routine(routine_id)
                .map(|items| {
                    items
                        .into_iter()
                        .filter_map(to_routine_exercise_item)
                        .collect()
                })
                .map_err(|err| err.to_string())
        }),
    );
    RoutineExerciseListResponse { ok, items, message }
}

#[flutter_rust_bridge::frb(sync)]
pub fn create_reminder(
    routine_id: i64,
    date_time: String,
    message: String,
    repeat: bool,
    frequency: String,
) -> ActionResponse {
    let reminder = Reminder {
        id: None,
        routine_id,
        date_time,
        message: message.trim().to_string(),
        repeat,
        frequency: frequency.trim().to_string(),
    };
    mutate("create_reminder", "Reminder scheduled.", |conn| {
        ReminderService::new(SqliteReminderRepository::new(conn))
            .insert(&reminder)
            .map(Some)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_reminder(reminder_id: i64) -> ActionResponse {
    mutate("delete_reminder", "Reminder deleted.", |conn| {
        let removed = ReminderService::new(SqliteReminderRepository::new(conn))
            .delete_by_id(reminder_id)
            .map_err(|err| err.to_string())?;
        ensure_removed("reminder", reminder_id, removed)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn list_reminders(routine_id: i64) -> ReminderListResponse {
    let (ok, items, message) = list_envelope(
        "list_reminders",
        with_conn(|conn| {
            ReminderService::new(SqliteReminderRepository::new(conn))
                .list_by_routine(routine_id)
                .map(|items| items.into_iter().filter_map(to_reminder_item).collect())
                .map_err(|err| err.to_string())
        }),
    );
    ReminderListResponse { ok, items, message }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| CoreConfig::from_env().db_path)
        .clone()
}

fn with_conn<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let store = shared_store(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    store.with_conn(f)
}

fn list_envelope<T>(operation: &str, result: Result<Vec<T>, String>) -> (bool, Vec<T>, String) {
    match result {
        Ok(items) => {
            let message = format!("{} item(s).", items.len());
            (true, items, message)
        }
        Err(err) => {
            error!("event=ffi_call module=ffi status=error op={operation}");
            (false, Vec::new(), format!("{operation} failed: {err}"))
        }
    }
}

fn exercise_service(
    conn: &Connection,
) -> ExerciseService<SqliteExerciseRepository<'_>, SqliteUserRepository<'_>> {
    ExerciseService::new(
        SqliteExerciseRepository::new(conn),
        SqliteUserRepository::new(conn),
    )
}

fn mutate(
    operation: &str,
    success_message: &str,
    f: impl FnOnce(&Connection) -> Result<Option<i64>, String>,
) -> ActionResponse {
    match with_conn(f) {
        Ok(id) => ActionResponse::success(success_message, id),
        Err(err) => action_failure(operation, err),
    }
}

fn action_failure(operation: &str, err: String) -> ActionResponse {
    error!("event=ffi_call module=ffi status=error op={operation}");
    ActionResponse::failure(format!("{operation} failed: {err}"))
}

fn ensure_removed(entity: &str, id: i64, removed: usize) -> Result<Option<i64>, String> {
    if removed == 0 {
        return Err(format!("{entity} not found: {id}"));
    }
    Ok(Some(id))
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn to_user_summary(user: User) -> Option<UserSummary> {
    Some(UserSummary {
        id: user.id?,
        name: user.name,
        email: user.email,
        registration_date: user.registration_date,
        is_admin: user.is_admin,
    })
}

fn to_routine_item(routine: Routine) -> Option<RoutineItem> {
    Some(RoutineItem {
        id: routine.id?,
        user_id: routine.user_id,
        name: routine.name,
        description: routine.description,
        day_of_week: routine.day_of_week,
        completed: routine.completed,
        creation_date: routine.creation_date,
    })
}

fn to_exercise_item(exercise: Exercise) -> Option<ExerciseItem> {
    Some(ExerciseItem {
        id: exercise.id?,
        name: exercise.name,
        description: exercise.description,
        duration_minutes: exercise.duration_minutes,
        user_id: exercise.user_id,
    })
}

fn to_routine_exercise_item(assignment: RoutineExercise) -> Option<RoutineExerciseItem> {
    Some(RoutineExerciseItem {
        id: assignment.id?,
        routine_id: assignment.routine_id,
        exercise_id: assignment.exercise_id,
        sets: assignment.sets,
        reps: assignment.reps,
    })
}

fn to_reminder_item(reminder: Reminder) -> Option<ReminderItem> {
    Some(ReminderItem {
        id: reminder.id?,
        routine_id: reminder.routine_id,
        date_time: reminder.date_time,
        message: reminder.message,
        repeat: reminder.repeat,
        frequency: reminder.frequency,
    })
}
