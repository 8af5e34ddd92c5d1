//! Aachar Core - Shared types library.
//!
//! This crate provides common types used across all Aachar components:
//! - `admin` - Catalog store, product form validation, navigation and auth gate
//! - `cli` - Interactive console driving the admin session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no async runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, spice levels and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
