#![allow(dead_code)]

use orgbook_core::db::{open_db_in_memory, StoreKind};
use orgbook_core::{
    Argon2PasswordHasher, CredentialService, EmployeeDraft, EmployeeId, EmployeeRepository,
    SqliteEmployeeRepository, SqliteUserRepository,
};
use rusqlite::Connection;

pub fn employee_store() -> Connection {
    open_db_in_memory(StoreKind::Employees).unwrap()
}

pub fn task_store() -> Connection {
    open_db_in_memory(StoreKind::Tasks).unwrap()
}

/// Inserts an employee and returns its id.
pub fn hire(
    conn: &Connection,
    name: &str,
    manager_id: Option<EmployeeId>,
) -> EmployeeId {
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();
    repo.create_employee(&EmployeeDraft::new(name, "Engineering", "Engineer").with_manager(manager_id))
        .unwrap()
}

/// Points `id` at a new manager, keeping other fields.
pub fn set_manager(conn: &Connection, id: EmployeeId, manager_id: Option<EmployeeId>) {
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();
    let current = repo.get_employee(id).unwrap().unwrap();
    let draft = EmployeeDraft::new(current.name, current.department, current.position)
        .with_manager(manager_id);
    assert_eq!(repo.update_employee(id, &draft).unwrap(), 1);
}

/// Credential service with cheap Argon2 cost for fast tests.
pub fn credential_service(
    conn: &Connection,
) -> CredentialService<SqliteUserRepository<'_>, Argon2PasswordHasher> {
    CredentialService::with_hasher(
        SqliteUserRepository::try_new(conn).unwrap(),
        Argon2PasswordHasher::with_cost(1024, 1, 1).unwrap(),
    )
}

pub fn count_users_named(conn: &Connection, username: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM users WHERE username = ?1;",
        [username],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}
