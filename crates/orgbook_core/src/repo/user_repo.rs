//! User account repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `username` uniqueness is enforced by the `users.username` UNIQUE index;
//!   duplicates surface as `RepoError::Constraint { kind: Unique, .. }`.
//! - Password hashes are only read through [`UserRepository::find_credential`].

use crate::db::StoreKind;
use crate::model::user::{NewUser, StoredCredential, User, UserId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for user accounts.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Loads the account and its stored hash by exact username.
    fn find_credential(&self, username: &str) -> RepoResult<Option<StoredCredential>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, StoreKind::Tasks, "users")?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (username, password_hash, email) VALUES (?1, ?2, ?3);",
            params![user.username, user.password_hash, user.email],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, email FROM users WHERE id = ?1;",
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email FROM users ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }
        Ok(users)
    }

    fn find_credential(&self, username: &str) -> RepoResult<Option<StoredCredential>> {
        let credential = self
            .conn
            .query_row(
                "SELECT id, username, email, password_hash
                 FROM users
                 WHERE username = ?1;",
                [username],
                |row| {
                    Ok(StoredCredential {
                        user: parse_user_row(row)?,
                        password_hash: row.get("password_hash")?,
                    })
                },
            )
            .optional()?;
        Ok(credential)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
    })
}
