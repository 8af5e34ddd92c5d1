//! Product domain types.
//!
//! A [`ProductDraft`] is what the create/edit form holds; a [`Product`] is a
//! catalog entry that passed validation and received an ID and timestamps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aachar_core::{Price, ProductId, SpiceLevel};

/// Separator used when ingredients are edited as a single line.
pub const INGREDIENT_SEPARATOR: char = ',';

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Immutable, unique within the catalog.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    /// Ordered, never contains empty entries.
    pub ingredients: Vec<String>,
    pub spice_level: SpiceLevel,
    /// Free text, e.g. `500g` or `1kg`.
    pub weight: String,
    pub image_url: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unvalidated product input as held by the form.
///
/// Ingredients are kept as one comma-separated string for editing and split
/// on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub ingredients: String,
    pub spice_level: SpiceLevel,
    pub weight: String,
    pub image_url: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            category: String::new(),
            ingredients: String::new(),
            spice_level: SpiceLevel::default(),
            weight: String::new(),
            image_url: String::new(),
            in_stock: true,
            featured: false,
        }
    }
}

impl ProductDraft {
    /// Split the ingredient line into trimmed, non-empty entries.
    ///
    /// ```
    /// use aachar_admin::models::ProductDraft;
    ///
    /// let draft = ProductDraft {
    ///     ingredients: "Mango, Salt,  , Chili".to_string(),
    ///     ..ProductDraft::default()
    /// };
    /// assert_eq!(draft.ingredient_list(), ["Mango", "Salt", "Chili"]);
    /// ```
    #[must_use]
    pub fn ingredient_list(&self) -> Vec<String> {
        split_ingredients(&self.ingredients)
    }

    /// Image URL, or `None` when left blank.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        let trimmed = self.image_url.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

impl From<&Product> for ProductDraft {
    /// Pre-fill the edit form from an existing product.
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount,
            category: product.category.clone(),
            ingredients: product.ingredients.join(", "),
            spice_level: product.spice_level,
            weight: product.weight.clone(),
            image_url: product.image_url.clone().unwrap_or_default(),
            in_stock: product.in_stock,
            featured: product.featured,
        }
    }
}

/// Split a comma-separated ingredient line, dropping blank segments.
#[must_use]
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(INGREDIENT_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
