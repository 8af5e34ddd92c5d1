//! Unified error handling for admin.
//!
//! Nothing here is fatal: every variant leaves the session usable and the
//! user can correct input and retry.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::catalog::seed::SeedError;
use crate::config::ConfigError;
use crate::forms::{FieldErrors, FieldInputError};
use crate::navigation::{NavigationError, SubmitError};
use crate::services::auth::AuthError;

/// Application-level error type for the admin console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Sample catalog could not be loaded.
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    /// Sign-in failed or was refused.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Action not available on the current screen.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Typed form input could not be applied.
    #[error("Input error: {0}")]
    Input(#[from] FieldInputError),

    /// The console needs a signed-in user for this.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Navigation(e) => Self::Navigation(e),
            SubmitError::Catalog(e) => Self::Catalog(e),
        }
    }
}

impl AppError {
    /// Field errors to show inline, if this is a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Catalog(CatalogError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }
}
