mod common;

use common::{count_rows, routine_draft, user_draft};
use gymtrack_core::db::{open_db, open_db_in_memory};
use gymtrack_core::{
    RepoError, RepoResult, RoutineRepository, ServiceError, SqliteRoutineRepository,
    SqliteUserRepository, User, UserId, UserRepository, UserService, ValidationError,
};
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn first_inserted_user_is_admin_and_later_ones_are_not() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let first = service.insert(&user_draft("Ana")).unwrap();
    let second = service.insert(&user_draft("Bruno")).unwrap();
    let third = service.insert(&user_draft("Carla")).unwrap();

    assert!(first.is_admin);
    assert!(!second.is_admin);
    assert!(!third.is_admin);

    let stored: Vec<bool> = service
        .list_all()
        .unwrap()
        .into_iter()
        .map(|user| user.is_admin)
        .collect();
    assert_eq!(stored, vec![true, false, false]);
}

#[test]
fn caller_supplied_admin_flag_is_overridden() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    service.insert(&user_draft("Ana")).unwrap();

    let mut sneaky = user_draft("Mallory");
    sneaky.is_admin = true;
    let stored = service.insert(&sneaky).unwrap();

    assert!(!stored.is_admin);
    assert!(!service.is_admin(stored.id.unwrap()).unwrap());
}

#[test]
fn register_grants_admin_only_to_first_user() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let mut first_draft = user_draft("Ana");
    first_draft.is_admin = false;
    let first = service.register(&first_draft).unwrap();
    let mut second_draft = user_draft("Bruno");
    second_draft.is_admin = true;
    let second = service.register(&second_draft).unwrap();

    assert!(first.is_admin);
    assert!(!second.is_admin);
    assert!(service.is_admin(first.id.unwrap()).unwrap());
    assert!(!service.is_admin(second.id.unwrap()).unwrap());
}

#[test]
fn insert_then_get_returns_equal_record_except_id() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let draft = user_draft("Ana");
    let stored = service.insert(&draft).unwrap();
    let loaded = service.get_by_id(stored.id.unwrap()).unwrap().unwrap();

    let mut expected = draft.clone();
    expected.id = stored.id;
    expected.is_admin = true;
    assert_eq!(loaded, expected);
}

#[test]
fn authenticate_matches_exact_credentials() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    let ana = service.insert(&user_draft("Ana")).unwrap();

    let found = service.authenticate("ana@gym.test", "secret").unwrap();
    assert_eq!(found.and_then(|user| user.id), ana.id);

    assert!(service
        .authenticate("ana@gym.test", "wrong")
        .unwrap()
        .is_none());
    assert!(service
        .authenticate("ANA@gym.test", "secret")
        .unwrap()
        .is_none());
}

#[test]
fn authenticate_on_empty_store_reports_no_users() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let err = service.authenticate("ana@gym.test", "secret").unwrap_err();
    assert!(matches!(err, ServiceError::NoUsersRegistered));
}

#[test]
fn blank_email_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let mut draft = user_draft("Ana");
    draft.email = "   ".to_string();
    let err = service.insert(&draft).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::Validation(ValidationError::BlankField {
            entity: "user",
            field: "email"
        }))
    ));
    assert_eq!(count_rows(&conn, "users"), 0);
}

#[test]
fn update_and_delete_user() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));
    let mut ana = service.insert(&user_draft("Ana")).unwrap();

    ana.name = "Ana Maria".to_string();
    service.update(&ana).unwrap();
    assert_eq!(
        service.get_by_id(ana.id.unwrap()).unwrap().unwrap().name,
        "Ana Maria"
    );

    service.delete(&ana).unwrap();
    assert!(service.get_by_id(ana.id.unwrap()).unwrap().is_none());
    assert!(matches!(
        service.delete(&ana).unwrap_err(),
        ServiceError::Repo(RepoError::NotFound { entity: "user", .. })
    ));
}

#[test]
fn update_unsaved_user_reports_missing_id() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::new(&conn));

    let err = service.update(&user_draft("Ana")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::MissingId("user"))
    ));
}

#[test]
fn deleting_user_keeps_their_routines() {
    let conn = open_db_in_memory().unwrap();
    let users = UserService::new(SqliteUserRepository::new(&conn));
    let routines = SqliteRoutineRepository::new(&conn);

    let ana = users.insert(&user_draft("Ana")).unwrap();
    let ana_id = ana.id.unwrap();
    routines.insert(&routine_draft(ana_id, "Push")).unwrap();

    assert_eq!(users.delete_by_id(ana_id).unwrap(), 1);
    assert_eq!(routines.list_by_user(ana_id).unwrap().len(), 1);
}

/// Accessor wrapper that parks every caller after `list_all` until all
/// participants have read, forcing the check-then-act interleaving.
struct RendezvousUsers<'conn> {
    inner: SqliteUserRepository<'conn>,
    barrier: Arc<Barrier>,
}

impl UserRepository for RendezvousUsers<'_> {
    fn insert(&self, user: &User) -> RepoResult<UserId> {
        self.inner.insert(user)
    }

    fn insert_granting_first_admin(&self, user: &User) -> RepoResult<(UserId, bool)> {
        self.inner.insert_granting_first_admin(user)
    }

    fn update(&self, user: &User) -> RepoResult<()> {
        self.inner.update(user)
    }

    fn delete(&self, user: &User) -> RepoResult<()> {
        self.inner.delete(user)
    }

    fn delete_by_id(&self, id: UserId) -> RepoResult<usize> {
        self.inner.delete_by_id(id)
    }

    fn get_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.inner.get_by_id(id)
    }

    fn list_all(&self) -> RepoResult<Vec<User>> {
        let users = self.inner.list_all()?;
        self.barrier.wait();
        Ok(users)
    }
}

fn register_concurrently(
    path: &Path,
    names: [&'static str; 2],
    atomic: bool,
) -> Vec<User> {
    let barrier = Arc::new(Barrier::new(names.len()));
    let handles: Vec<_> = names
        .into_iter()
        .map(|name| {
            let path = path.to_path_buf();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service = UserService::new(RendezvousUsers {
                    inner: SqliteUserRepository::new(&conn),
                    barrier,
                });
                if atomic {
                    service.register(&user_draft(name)).unwrap()
                } else {
                    service.insert(&user_draft(name)).unwrap()
                }
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect()
}

/// Known race: `insert` reads the user list and inserts in two steps, so
/// two first registrations that both read an empty table both become admin.
/// This asserts the current behavior; `register` is the atomic path.
#[test]
fn concurrent_first_inserts_can_both_become_admin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("race.db");
    drop(open_db(&path).unwrap());

    let users = register_concurrently(&path, ["Ana", "Bruno"], false);

    assert!(users.iter().all(|user| user.is_admin));
    let conn = open_db(&path).unwrap();
    let admins: i64 = conn
        .query_row("SELECT COUNT(*) FROM users WHERE is_admin = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(admins, 2);
}

#[test]
fn concurrent_first_registers_yield_exactly_one_admin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atomic.db");
    drop(open_db(&path).unwrap());

    let users = register_concurrently(&path, ["Ana", "Bruno"], true);

    assert_eq!(users.iter().filter(|user| user.is_admin).count(), 1);
    let conn = open_db(&path).unwrap();
    assert_eq!(common::count_rows(&conn, "users"), 2);
}
