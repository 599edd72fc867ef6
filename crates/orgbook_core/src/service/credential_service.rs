//! Account registration and login.
//!
//! # Responsibility
//! - Hash passwords with Argon2id and a random per-credential salt.
//! - Enforce unique usernames through the storage UNIQUE constraint.
//! - Verify login attempts against stored PHC hashes.
//!
//! # Invariants
//! - Plaintext passwords are never persisted, returned or logged.
//! - A duplicate username is a `false` result, not an error.
//! - Usernames are trimmed; passwords are used byte-for-byte.

use crate::model::user::{NewUser, User};
use crate::model::validation::{require_text, ValidationError};
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoError;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use log::{info, warn};
use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SALT_LEN: usize = 16;

/// Well-formed Argon2id PHC string at the crate's default cost (zero salt and
/// output). Unknown usernames are verified against it so a failed login costs
/// one Argon2 run whether or not the account exists.
const DUMMY_PHC_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Errors from credential operations. Wrong passwords are not errors.
#[derive(Debug)]
pub enum CredentialError {
    Validation(ValidationError),
    /// Hashing failed or a stored hash could not be parsed.
    Hashing(String),
    Repo(RepoError),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Hashing(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for CredentialError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CredentialError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Password hashing primitive.
pub trait PasswordHasher {
    /// Returns a self-describing hash string that embeds its salt.
    fn hash_password(&self, password: &str) -> Result<String, CredentialError>;
    /// Returns `Ok(false)` for a well-formed hash that does not match.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Argon2id hasher with default parameters, PHC string output.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Argon2id with the crate's recommended default cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with explicit memory (KiB), iteration and lane costs.
    pub fn with_cost(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, CredentialError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::Hashing(err.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(hash).map_err(|err| CredentialError::Hashing(err.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(CredentialError::Hashing(err.to_string())),
        }
    }
}

/// Registration/login use-cases over a user repository.
pub struct CredentialService<R: UserRepository, H: PasswordHasher = Argon2PasswordHasher> {
    repo: R,
    hasher: H,
}

impl<R: UserRepository> CredentialService<R> {
    /// Creates a service using Argon2id.
    pub fn new(repo: R) -> Self {
        Self::with_hasher(repo, Argon2PasswordHasher::new())
    }
}

impl<R: UserRepository, H: PasswordHasher> CredentialService<R, H> {
    pub fn with_hasher(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Registers a new account.
    ///
    /// Returns `Ok(false)` when the username is already taken.
    ///
    /// # Errors
    /// - `Validation` for a blank username/password or malformed email.
    /// - `Hashing` / `Repo` for infrastructure failures.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<bool, CredentialError> {
        let username = require_text("username", username)?;
        if password.is_empty() {
            return Err(ValidationError::BlankField("password").into());
        }
        let email = normalize_email(email)?;

        let new_user = NewUser {
            username,
            password_hash: self.hasher.hash_password(password)?,
            email,
        };

        match self.repo.create_user(&new_user) {
            Ok(user_id) => {
                info!("event=user_register module=credential status=ok user_id={user_id}");
                Ok(true)
            }
            Err(err) if err.is_unique_violation() => {
                info!("event=user_register module=credential status=conflict");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns the account when `password` matches its stored hash.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>, CredentialError> {
        let Some(credential) = self.repo.find_credential(username.trim())? else {
            // Outcome is ignored; only the work matters here.
            let _ = self.hasher.verify_password(password, DUMMY_PHC_HASH);
            info!("event=user_login module=credential status=not_found");
            return Ok(None);
        };

        if self
            .hasher
            .verify_password(password, &credential.password_hash)?
        {
            info!(
                "event=user_login module=credential status=ok user_id={}",
                credential.user.id
            );
            return Ok(Some(credential.user));
        }

        warn!(
            "event=user_login module=credential status=rejected user_id={}",
            credential.user.id
        );
        Ok(None)
    }
}

fn normalize_email(email: Option<&str>) -> Result<Option<String>, ValidationError> {
    match email.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if EMAIL_RE.is_match(value) => Ok(Some(value.to_string())),
        Some(_) => Err(ValidationError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_email, Argon2PasswordHasher, CredentialError, CredentialService,
        PasswordHasher, DUMMY_PHC_HASH,
    };
    use crate::db::{open_db_in_memory, StoreKind};
    use crate::model::validation::ValidationError;
    use crate::repo::user_repo::SqliteUserRepository;
    use std::cell::RefCell;

    /// Records every hash string it is asked to verify against.
    struct RecordingHasher {
        inner: Argon2PasswordHasher,
        verified: RefCell<Vec<String>>,
    }

    impl PasswordHasher for RecordingHasher {
        fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
            self.inner.hash_password(password)
        }

        fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
            self.verified.borrow_mut().push(hash.to_string());
            self.inner.verify_password(password, hash)
        }
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash_password("hunter2").unwrap();
        let second = hasher.hash_password("hunter2").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("hunter2"));
        assert!(hasher.verify_password("hunter2", &first).unwrap());
        assert!(!hasher.verify_password("hunter3", &first).unwrap());
    }

    #[test]
    fn custom_cost_hashes_verify_with_default_hasher() {
        let cheap = Argon2PasswordHasher::with_cost(1024, 1, 1).unwrap();
        let hash = cheap.hash_password("pw").unwrap();
        assert!(hash.contains("m=1024,t=1,p=1"));
        // Parameters travel inside the PHC string.
        assert!(Argon2PasswordHasher::new().verify_password("pw", &hash).unwrap());
        assert!(Argon2PasswordHasher::with_cost(1, 1, 1).is_err());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify_password("pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn dummy_hash_parses_and_matches_nothing() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify_password("", DUMMY_PHC_HASH).unwrap());
        assert!(!hasher.verify_password("hunter2", DUMMY_PHC_HASH).unwrap());
    }

    #[test]
    fn unknown_username_still_runs_a_verification() {
        let conn = open_db_in_memory(StoreKind::Tasks).unwrap();
        let service = CredentialService::with_hasher(
            SqliteUserRepository::try_new(&conn).unwrap(),
            RecordingHasher {
                inner: Argon2PasswordHasher::with_cost(1024, 1, 1).unwrap(),
                verified: RefCell::new(Vec::new()),
            },
        );
        service.register("known", "pw", None).unwrap();

        assert!(service.login("ghost", "pw").unwrap().is_none());
        assert!(service.login("known", "wrong").unwrap().is_none());

        let verified = service.hasher.verified.borrow();
        assert_eq!(verified.len(), 2);
        assert_eq!(verified[0], DUMMY_PHC_HASH);
        assert_ne!(verified[1], DUMMY_PHC_HASH);
    }

    #[test]
    fn email_is_optional_but_shaped() {
        assert_eq!(normalize_email(None).unwrap(), None);
        assert_eq!(normalize_email(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_email(Some(" a@b.io ")).unwrap(),
            Some("a@b.io".to_string())
        );
        assert_eq!(
            normalize_email(Some("nobody")).unwrap_err(),
            ValidationError::InvalidEmail
        );
    }
}
