use orgbook_core::db::migrations::latest_version;
use orgbook_core::db::{open_db, open_db_in_memory, Database, DbError, StoreKind};
use orgbook_core::{RepoError, SqliteEmployeeRepository, SqliteTaskRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_employee_migrations() {
    let conn = open_db_in_memory(StoreKind::Employees).unwrap();

    assert_eq!(schema_version(&conn), latest_version(StoreKind::Employees));
    assert_table_exists(&conn, "employees");
    assert_table_missing(&conn, "tasks");
}

#[test]
fn open_db_in_memory_applies_task_migrations() {
    let conn = open_db_in_memory(StoreKind::Tasks).unwrap();

    assert_eq!(schema_version(&conn), latest_version(StoreKind::Tasks));
    assert_table_exists(&conn, "users");
    assert_table_exists(&conn, "projects");
    assert_table_exists(&conn, "tasks");
    assert_table_exists(&conn, "assignments");
    assert_table_missing(&conn, "employees");
}

#[test]
fn connections_enforce_foreign_keys() {
    let conn = open_db_in_memory(StoreKind::Tasks).unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.sqlite3");

    let conn_first = open_db(&path, StoreKind::Employees).unwrap();
    conn_first
        .execute(
            "INSERT INTO employees (name, department, position) VALUES ('Anna', 'Ops', 'Lead');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path, StoreKind::Employees).unwrap();
    assert_eq!(
        schema_version(&conn_second),
        latest_version(StoreKind::Employees)
    );
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM employees;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn database_handle_opens_fresh_connections() {
    let dir = tempfile::tempdir().unwrap();
    let database = Database::new(StoreKind::Tasks, dir.path().join("tasks.sqlite3"));

    let first = database.connect().unwrap();
    let second = database.connect().unwrap();
    first
        .execute("INSERT INTO projects (name) VALUES ('Apollo');", [])
        .unwrap();
    let seen: i64 = second
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(seen, 1);
    assert_eq!(database.kind(), StoreKind::Tasks);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, StoreKind::Tasks).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            store,
            db_version,
            latest_supported,
        } => {
            assert_eq!(store, StoreKind::Tasks);
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(StoreKind::Tasks));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repositories_reject_unmigrated_or_foreign_connections() {
    let raw = Connection::open_in_memory().unwrap();
    let err = SqliteEmployeeRepository::try_new(&raw).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            store: StoreKind::Employees,
            actual_version: 0,
            ..
        }
    ));

    let employees = open_db_in_memory(StoreKind::Employees).unwrap();
    let err = SqliteTaskRepository::try_new(&employees).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            store: StoreKind::Tasks,
            ..
        }
    ));

    let versioned_but_empty = Connection::open_in_memory().unwrap();
    versioned_but_empty
        .execute_batch(&format!(
            "PRAGMA user_version = {};",
            latest_version(StoreKind::Employees)
        ))
        .unwrap();
    let err = SqliteEmployeeRepository::try_new(&versioned_but_empty)
        .err()
        .unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("employees")));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    exists == 1
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert!(table_exists(conn, table_name), "table {table_name} does not exist");
}

fn assert_table_missing(conn: &Connection, table_name: &str) {
    assert!(!table_exists(conn, table_name), "table {table_name} should not exist");
}
