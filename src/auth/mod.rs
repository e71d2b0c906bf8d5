pub mod password;
pub mod session;

use thiserror::Error;

use crate::database::DatabaseError;

pub use password::CredentialScheme;
pub use session::{SessionClaims, SessionKeys};

/// Credential and session failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Deliberately the same for unknown users and wrong passwords.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Session token error: {0}")]
    Token(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl AuthError {
    /// Errors caused by what the user typed, shown inline on the form.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AuthError::MissingField(_)
                | AuthError::UsernameTaken
                | AuthError::PasswordTooShort { .. }
                | AuthError::PasswordMismatch
                | AuthError::InvalidCredentials
        )
    }
}
