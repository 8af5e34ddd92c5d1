//! Catalog store.
//!
//! The [`Catalog`] owns the ordered product list. Every mutation goes through
//! [`Catalog::create`], [`Catalog::update`] or [`Catalog::delete`]; each one
//! validates, then writes, with no suspension point in between.

pub mod backend;
pub mod seed;

pub use backend::{BackendError, CatalogBackend, MemoryBackend};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use aachar_core::{CurrencyCode, Price, ProductId};

use crate::forms::{FieldErrors, validate};
use crate::models::{Product, ProductDraft};

/// Errors returned by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The draft broke one or more form rules.
    #[error("invalid product: {0}")]
    Validation(FieldErrors),

    /// No product has this ID.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// The backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Counts shown above the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub in_stock: usize,
    pub featured: usize,
}

/// The product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog<B = MemoryBackend> {
    backend: B,
    currency: CurrencyCode,
}

impl Catalog<MemoryBackend> {
    /// Empty in-memory catalog priced in `currency`.
    #[must_use]
    pub const fn in_memory(currency: CurrencyCode) -> Self {
        Self::new(MemoryBackend::new(), currency)
    }
}

impl<B: CatalogBackend> Catalog<B> {
    #[must_use]
    pub const fn new(backend: B, currency: CurrencyCode) -> Self {
        Self { backend, currency }
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Validate `draft` and append it as a new product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the draft is invalid; the
    /// catalog is unchanged.
    #[instrument(skip_all, fields(name = %draft.name.trim()))]
    pub fn create(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        check(&draft)?;

        let id = self.fresh_id()?;
        let now = Utc::now();
        let product = self.build(id, &draft, now, now);
        self.backend.insert(product.clone())?;

        info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Validate `draft` and replace product `id` in place.
    ///
    /// The ID, position and creation time are kept; `updated_at` moves
    /// forward and never goes backwards.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if `id` is absent, or
    /// `CatalogError::Validation` if the draft is invalid. The catalog is
    /// unchanged on error.
    #[instrument(skip(self, draft), fields(product_id = %id))]
    pub fn update(&mut self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        let existing = self.backend.get(id)?.ok_or(CatalogError::NotFound(id))?;
        check(&draft)?;

        let updated_at = Utc::now().max(existing.updated_at);
        let product = self.build(id, &draft, existing.created_at, updated_at);
        if !self.backend.replace(product.clone())? {
            return Err(CatalogError::NotFound(id));
        }

        info!("Updated product");
        Ok(product)
    }

    /// Remove product `id`. Absent IDs are a no-op.
    ///
    /// Returns whether a product was removed.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn delete(&mut self, id: ProductId) -> Result<bool, CatalogError> {
        let removed = self.backend.remove(id)?;
        if removed {
            info!("Deleted product");
        } else {
            debug!("Delete of absent product ignored");
        }
        Ok(removed)
    }

    /// Snapshot of every product in insertion order.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    pub fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.backend.products()?)
    }

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if `id` is absent.
    pub fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.backend.get(id)?.ok_or(CatalogError::NotFound(id))
    }

    /// Total, in-stock and featured counts.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    pub fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let products = self.backend.products()?;
        Ok(CatalogStats {
            total: products.len(),
            in_stock: products.iter().filter(|p| p.in_stock).count(),
            featured: products.iter().filter(|p| p.featured).count(),
        })
    }

    fn fresh_id(&self) -> Result<ProductId, CatalogError> {
        loop {
            let id = ProductId::generate();
            if !self.backend.contains(id)? {
                return Ok(id);
            }
        }
    }

    fn build(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id,
            name: draft.name.trim().to_owned(),
            description: draft.description.trim().to_owned(),
            price: Price::new(draft.price, self.currency),
            category: draft.category.trim().to_owned(),
            ingredients: draft.ingredient_list(),
            spice_level: draft.spice_level,
            weight: draft.weight.trim().to_owned(),
            image_url: draft.image_url(),
            in_stock: draft.in_stock,
            featured: draft.featured,
            created_at,
            updated_at,
        }
    }
}

fn check(draft: &ProductDraft) -> Result<(), CatalogError> {
    let errors = validate(draft);
    if errors.is_empty() {
        Ok(())
    } else {
        debug!(%errors, "Draft rejected");
        Err(CatalogError::Validation(errors))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use aachar_core::SpiceLevel;

    use super::*;
    use crate::forms::FormField;

    fn mango() -> ProductDraft {
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

    fn lemon() -> ProductDraft {
        ProductDraft {
            name: "Lemon Pickle".to_string(),
            category: "Citrus".to_string(),
            ingredients: "Lemon, Salt".to_string(),
            ..mango()
        }
    }

    #[test]
    fn test_create_appends_with_fresh_id() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let first = catalog.create(mango()).unwrap();
        let second = catalog.create(lemon()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.created_at, first.updated_at);

        let ids: Vec<_> = catalog.list().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_create_builds_product_from_draft() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let product = catalog.create(mango()).unwrap();

        assert_eq!(product.name, "Mango Pickle");
        assert_eq!(product.price, Price::new(Decimal::from(150), CurrencyCode::INR));
        assert_eq!(product.ingredients, vec!["Mango", "Salt", "Chili"]);
        assert_eq!(product.spice_level, SpiceLevel::Hot);
        assert_eq!(product.image_url, None);
        assert!(product.in_stock);
        assert!(!product.featured);
    }

    #[test]
    fn test_create_trims_text_fields() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let product = catalog
            .create(ProductDraft {
                name: "  Garlic Pickle ".to_string(),
                weight: " 1kg".to_string(),
                ..mango()
            })
            .unwrap();
        assert_eq!(product.name, "Garlic Pickle");
        assert_eq!(product.weight, "1kg");
    }

    #[test]
    fn test_create_invalid_leaves_catalog_unchanged() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let err = catalog
            .create(ProductDraft {
                price: Decimal::ZERO,
                ..mango()
            })
            .unwrap_err();

        let CatalogError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains(FormField::Price));
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_id_position_and_created_at() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let first = catalog.create(mango()).unwrap();
        let second = catalog.create(lemon()).unwrap();

        let updated = catalog
            .update(
                first.id,
                ProductDraft {
                    price: Decimal::from(175),
                    featured: true,
                    ..mango()
                },
            )
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(updated.created_at, first.created_at);
        assert!(updated.updated_at >= first.updated_at);
        assert!(updated.featured);

        let list = catalog.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], updated);
        assert_eq!(list[1].id, second.id);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let id = ProductId::generate();
        let err = catalog.update(id, mango()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(missing) if missing == id));
    }

    #[test]
    fn test_update_invalid_leaves_entry_unchanged() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let product = catalog.create(mango()).unwrap();

        let err = catalog
            .update(
                product.id,
                ProductDraft {
                    name: String::new(),
                    ..mango()
                },
            )
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(catalog.get(product.id).unwrap(), product);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let product = catalog.create(mango()).unwrap();

        assert!(catalog.delete(product.id).unwrap());
        assert!(!catalog.delete(product.id).unwrap());
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        catalog.create(mango()).unwrap();
        catalog
            .create(ProductDraft {
                in_stock: false,
                featured: true,
                ..lemon()
            })
            .unwrap();

        assert_eq!(
            catalog.stats().unwrap(),
            CatalogStats {
                total: 2,
                in_stock: 1,
                featured: 1,
            }
        );
    }
}
