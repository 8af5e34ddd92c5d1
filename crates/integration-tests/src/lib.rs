//! Integration tests for the Aachar admin console.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p aachar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `admin_catalog` - Catalog store, validation and navigation together
//! - `admin_session_flow` - Sign-in gate through to the admin panel
//!
//! Auth delays run on tokio's paused clock, so no test sleeps for real.
//! Shared fixtures live here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use rust_decimal::Decimal;

use aachar_admin::models::ProductDraft;
use aachar_admin::services::MockIdentityProvider;
use aachar_admin::{AdminConfig, AdminSession};
use aachar_core::SpiceLevel;

/// The Mango Pickle draft used across scenarios.
#[must_use]
pub fn mango_pickle() -> ProductDraft {
    ProductDraft {
        name: "Mango Pickle".to_string(),
        description: "Spicy".to_string(),
        price: Decimal::from(150),
        category: "Fruit".to_string(),
        ingredients: "Mango, Salt, Chili".to_string(),
        spice_level: SpiceLevel::Hot,
        weight: "500g".to_string(),
        ..ProductDraft::default()
    }
}

/// A valid draft with the given name.
#[must_use]
pub fn draft_named(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        ..mango_pickle()
    }
}

/// A session with the default mock delays and an empty starting catalog.
#[must_use]
pub fn empty_session() -> AdminSession<MockIdentityProvider> {
    let config = AdminConfig {
        seed_catalog: false,
        ..AdminConfig::default()
    };
    let provider = config.identity_provider();
    AdminSession::new(config, provider)
}

/// A session whose admin panel starts with the sample catalog.
#[must_use]
pub fn seeded_session() -> AdminSession<MockIdentityProvider> {
    let config = AdminConfig::default();
    let provider = config.identity_provider();
    AdminSession::new(config, provider)
}

/// The default mock login latency.
pub const LOGIN_DELAY: Duration = MockIdentityProvider::LOGIN_DELAY;
