//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required registration field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,

    /// The session token does not belong to the current session.
    #[error("session token invalid or revoked")]
    InvalidToken,
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::NotAuthenticated | AuthError::InvalidToken
        )
    }
}
