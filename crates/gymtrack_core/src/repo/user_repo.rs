//! User accessor contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `users` table.
//! - Offer an atomic "first user becomes admin" insert.
//!
//! # Invariants
//! - `insert` stores `is_admin` exactly as given; admin policy lives in the
//!   user service.

use crate::model::user::User;
use crate::model::UserId;
use crate::repo::{bool_to_int, ensure_changed, int_to_bool, require_id, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const USER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    password,
    registration_date,
    is_admin
FROM users";

/// Accessor interface for user persistence.
pub trait UserRepository {
    fn insert(&self, user: &User) -> RepoResult<UserId>;
    /// Inserts `user` with `is_admin` set iff the table was empty, as one
    /// write transaction. Returns the new id and the granted flag.
    fn insert_granting_first_admin(&self, user: &User) -> RepoResult<(UserId, bool)>;
    fn update(&self, user: &User) -> RepoResult<()>;
    fn delete(&self, user: &User) -> RepoResult<()>;
    fn delete_by_id(&self, id: UserId) -> RepoResult<usize>;
    fn get_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    fn list_all(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user accessor.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (name, email, password, registration_date, is_admin)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.name.as_str(),
                user.email.as_str(),
                user.password.as_str(),
                user.registration_date.as_str(),
                bool_to_int(user.is_admin),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn insert_granting_first_admin(&self, user: &User) -> RepoResult<(UserId, bool)> {
        user.validate()?;

        // IMMEDIATE takes the write lock up front so two connections cannot
        // both observe an empty table.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let is_admin: bool =
            tx.query_row("SELECT NOT EXISTS (SELECT 1 FROM users);", [], |row| {
                row.get(0)
            })?;
        tx.execute(
            "INSERT INTO users (name, email, password, registration_date, is_admin)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.name.as_str(),
                user.email.as_str(),
                user.password.as_str(),
                user.registration_date.as_str(),
                bool_to_int(is_admin),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok((id, is_admin))
    }

    fn update(&self, user: &User) -> RepoResult<()> {
        let id = require_id("user", user.id)?;
        user.validate()?;

        let changed = self.conn.execute(
            "UPDATE users
             SET
                name = ?1,
                email = ?2,
                password = ?3,
                registration_date = ?4,
                is_admin = ?5
             WHERE id = ?6;",
            params![
                user.name.as_str(),
                user.email.as_str(),
                user.password.as_str(),
                user.registration_date.as_str(),
                bool_to_int(user.is_admin),
                id,
            ],
        )?;

        ensure_changed("user", id, changed)
    }

    fn delete(&self, user: &User) -> RepoResult<()> {
        let id = require_id("user", user.id)?;
        let changed = self.delete_by_id(id)?;
        ensure_changed("user", id, changed)
    }

    fn delete_by_id(&self, id: UserId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        email: row.get("email")?,
        password: row.get("password")?,
        registration_date: row.get("registration_date")?,
        is_admin: int_to_bool("users", "is_admin", row.get("is_admin")?)?,
    })
}
