//! Storage behind the catalog.
//!
//! The catalog only needs ordered insert, in-place replace, remove and a
//! snapshot read. [`MemoryBackend`] keeps products in a `Vec`; a durable
//! store can implement [`CatalogBackend`] without touching the catalog API.

use thiserror::Error;

use aachar_core::ProductId;

use crate::models::Product;

/// Errors raised by a catalog backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A product with this ID is already stored.
    #[error("duplicate product id: {0}")]
    Conflict(ProductId),

    /// The underlying store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Ordered product storage keyed by [`ProductId`].
pub trait CatalogBackend {
    /// Every product in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be read.
    fn products(&self) -> Result<Vec<Product>, BackendError>;

    /// Look up one product.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be read.
    fn get(&self, id: ProductId) -> Result<Option<Product>, BackendError>;

    /// Whether `id` is taken.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be read.
    fn contains(&self, id: ProductId) -> Result<bool, BackendError> {
        Ok(self.get(id)?.is_some())
    }

    /// Append a product at the end.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Conflict` if the ID is already stored.
    fn insert(&mut self, product: Product) -> Result<(), BackendError>;

    /// Replace the product with the same ID, keeping its position.
    /// Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be written.
    fn replace(&mut self, product: Product) -> Result<bool, BackendError>;

    /// Remove by ID. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Storage` if the store cannot be written.
    fn remove(&mut self, id: ProductId) -> Result<bool, BackendError>;
}

/// In-memory backend. Contents are lost when it is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    products: Vec<Product>,
}

impl MemoryBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }
}

impl CatalogBackend for MemoryBackend {
    fn products(&self) -> Result<Vec<Product>, BackendError> {
        Ok(self.products.clone())
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, BackendError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    fn contains(&self, id: ProductId) -> Result<bool, BackendError> {
        Ok(self.position(id).is_some())
    }

    fn insert(&mut self, product: Product) -> Result<(), BackendError> {
        if self.position(product.id).is_some() {
            return Err(BackendError::Conflict(product.id));
        }
        self.products.push(product);
        Ok(())
    }

    fn replace(&mut self, product: Product) -> Result<bool, BackendError> {
        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            return Ok(false);
        };
        *slot = product;
        Ok(true)
    }

    fn remove(&mut self, id: ProductId) -> Result<bool, BackendError> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        Ok(self.products.len() != before)
    }
}
