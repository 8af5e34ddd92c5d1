//! Product form: field names, validation and the in-progress edit.
//!
//! Validation is pure. [`validate`] can run on every keystroke; it only looks
//! at the draft and returns the field errors it finds.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use aachar_core::SpiceLevel;

use crate::models::{Product, ProductDraft};

/// Every field on the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Description,
    Price,
    Category,
    Ingredients,
    SpiceLevel,
    Weight,
    ImageUrl,
    InStock,
    Featured,
}

impl FormField {
    /// All fields in form order.
    pub const ALL: [Self; 10] = [
        Self::Name,
        Self::Description,
        Self::Price,
        Self::Category,
        Self::Ingredients,
        Self::SpiceLevel,
        Self::Weight,
        Self::ImageUrl,
        Self::InStock,
        Self::Featured,
    ];

    /// Machine name, as accepted by [`str::parse`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::Ingredients => "ingredients",
            Self::SpiceLevel => "spice_level",
            Self::Weight => "weight",
            Self::ImageUrl => "image_url",
            Self::InStock => "in_stock",
            Self::Featured => "featured",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormField {
    type Err = FieldInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == wanted)
            .ok_or_else(|| FieldInputError::UnknownField(s.to_owned()))
    }
}

/// Field errors from one validation pass, keyed by field.
///
/// Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// No errors.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Record an error, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the error for `field`. Returns whether there was one.
    pub fn clear(&mut self, field: FormField) -> bool {
        self.0.remove(&field).is_some()
    }

    /// Failed fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Check a draft against the form rules.
///
/// Text fields are trimmed before checking. Spice level, image URL and the
/// two flags are never flagged.
#[must_use]
pub fn validate(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&draft.name) {
        errors.insert(FormField::Name, "Product name is required");
    }
    if is_blank(&draft.description) {
        errors.insert(FormField::Description, "Description is required");
    }
    if draft.price <= Decimal::ZERO {
        errors.insert(FormField::Price, "Price must be greater than 0");
    }
    if is_blank(&draft.category) {
        errors.insert(FormField::Category, "Category is required");
    }
    if is_blank(&draft.ingredients) || draft.ingredient_list().is_empty() {
        errors.insert(FormField::Ingredients, "Ingredients are required");
    }
    if is_blank(&draft.weight) {
        errors.insert(FormField::Weight, "Weight is required");
    }

    errors
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A typed value could not be applied to a form field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldInputError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    SpiceLevel(#[from] aachar_core::SpiceLevelError),

    #[error("{field} expects yes or no, got {value:?}")]
    NotABool { field: FormField, value: String },
}

/// What the form is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Creating a product that does not exist yet.
    New,
    /// Editing a snapshot of an existing product.
    Existing(Box<Product>),
}

/// An open create/edit form: the draft plus the errors currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    target: EditTarget,
    draft: ProductDraft,
    errors: FieldErrors,
}

impl ProductForm {
    /// Empty form for a new product.
    #[must_use]
    pub fn create() -> Self {
        Self {
            target: EditTarget::New,
            draft: ProductDraft::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Form pre-filled from `product`.
    #[must_use]
    pub fn edit(product: Product) -> Self {
        let draft = ProductDraft::from(&product);
        Self {
            target: EditTarget::Existing(Box::new(product)),
            draft,
            errors: FieldErrors::new(),
        }
    }

    #[must_use]
    pub const fn target(&self) -> &EditTarget {
        &self.target
    }

    /// Product being edited, `None` when creating.
    #[must_use]
    pub fn editing(&self) -> Option<&Product> {
        match &self.target {
            EditTarget::New => None,
            EditTarget::Existing(product) => Some(product.as_ref()),
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replace the whole draft. Existing errors stay until the next submit.
    pub fn set_draft(&mut self, draft: ProductDraft) {
        self.draft = draft;
    }

    pub(crate) fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Apply typed input to one field and clear that field's error.
    ///
    /// Price input that is not a number becomes 0, which the validator then
    /// rejects.
    ///
    /// # Errors
    ///
    /// Returns [`FieldInputError`] if a spice level or flag value cannot be
    /// understood. The draft is unchanged in that case.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FieldInputError> {
        match field {
            FormField::Name => self.draft.name = value.to_owned(),
            FormField::Description => self.draft.description = value.to_owned(),
            FormField::Price => self.draft.price = parse_price(value),
            FormField::Category => self.draft.category = value.to_owned(),
            FormField::Ingredients => self.draft.ingredients = value.to_owned(),
            FormField::SpiceLevel => self.draft.spice_level = value.parse::<SpiceLevel>()?,
            FormField::Weight => self.draft.weight = value.to_owned(),
            FormField::ImageUrl => self.draft.image_url = value.to_owned(),
            FormField::InStock => self.draft.in_stock = parse_flag(field, value)?,
            FormField::Featured => self.draft.featured = parse_flag(field, value)?,
        }
        self.errors.clear(field);
        Ok(())
    }
}

fn parse_price(value: &str) -> Decimal {
    value.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn parse_flag(field: FormField, value: &str) -> Result<bool, FieldInputError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(FieldInputError::NotABool {
            field,
            value: value.to_owned(),
        }),
    }
}
