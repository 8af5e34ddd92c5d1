//! Domain models for admin.

pub mod identity;
pub mod product;

pub use identity::Identity;
pub use product::{Product, ProductDraft, split_ingredients};
