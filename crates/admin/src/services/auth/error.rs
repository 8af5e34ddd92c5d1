//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while signing in or signing up.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] aachar_core::EmailError),

    /// A required form field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Signup password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A login or signup is still waiting on the provider.
    #[error("a sign-in request is already in progress")]
    AlreadyInProgress,

    /// Someone is already signed in; log out first.
    #[error("already signed in as {0}")]
    AlreadySignedIn(String),

    /// The identity provider refused the credentials.
    ///
    /// The mock provider never returns this.
    #[error("sign-in rejected: {0}")]
    Rejected(String),
}
