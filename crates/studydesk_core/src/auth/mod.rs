//! Account registration, login and the persisted session pointer.
//!
//! # Responsibility
//! - Keep the `users` collection and the `currentUser` session slot.
//! - Route every password comparison through one `PasswordPolicy`.
//!
//! # Invariants
//! - Emails are unique across all stored users.
//! - Returned and session-persisted users never carry a password.
//! - `logout` clears the session pointer only; accounts are never deleted.

use crate::store::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod auth_repo;
mod password;

pub use auth_repo::KvAuthRepository;
pub use password::{PasswordPolicy, PlaintextPasswords};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug)]
pub enum AuthError {
    /// Registration attempted with an email that already has an account.
    DuplicateEmail(String),
    /// No account matches the supplied email and password.
    InvalidCredentials,
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
