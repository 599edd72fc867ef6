//! User account model.
//!
//! # Invariants
//! - `username` is unique per store.
//! - [`User`] never carries password material; the hash only travels inside
//!   [`StoredCredential`] between repository and credential service.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

pub type UserId = i64;

/// Public account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
}

/// Insert payload for a new account. `password_hash` is a PHC string.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}

/// Account row together with its stored password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub user: User,
    pub password_hash: String,
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

impl Debug for StoredCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
