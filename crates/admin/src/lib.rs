//! Aachar Admin library.
//!
//! Everything behind the pickle catalog console, with no rendering:
//!
//! - [`catalog`] - Ordered product store with create/update/delete/list
//! - [`forms`] - Product form validation and the login/signup forms
//! - [`navigation`] - List/form state machine and grid/list presentation
//! - [`services::auth`] - Auth gate and the mock identity provider
//! - [`session`] - Sign-in through to the admin panel
//!
//! # State
//!
//! Nothing is persisted. The catalog lives inside the admin panel and is
//! dropped on logout.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod services;
pub mod session;

pub use catalog::{Catalog, CatalogError, CatalogStats};
pub use config::AdminConfig;
pub use error::AppError;
pub use navigation::{Navigator, Screen, ViewMode};
pub use session::{AdminPanel, AdminSession};
