//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gymtrack_core` linkage and the configured database.
//! - Keep output deterministic for quick local sanity checks.

use gymtrack_core::db::migrations::current_user_version;
use gymtrack_core::db::open_db;
use gymtrack_core::{init_logging_from_config, CoreConfig};
use std::process::ExitCode;

const TABLES: &[&str] = &[
    "users",
    "routines",
    "exercises",
    "routine_exercises",
    "reminders",
];

fn main() -> ExitCode {
    println!("gymtrack_core ping={}", gymtrack_core::ping());
    println!("gymtrack_core version={}", gymtrack_core::core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    match report(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("db_path={} error={err}", config.db_path.display());
            ExitCode::FAILURE
        }
    }
}

fn report(config: &CoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    println!("db_path={}", config.db_path.display());
    println!("schema_version={}", current_user_version(&conn)?);

    for table in TABLES {
        let rows: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })?;
        println!("rows.{table}={rows}");
    }
    Ok(())
}
