//! Business logic services for admin.

pub mod auth;

pub use auth::{AuthGate, AuthState, IdentityProvider, MockIdentityProvider};
