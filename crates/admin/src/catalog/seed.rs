//! Sample catalog loaded at the start of an admin session.

use thiserror::Error;
use tracing::info;

use super::{Catalog, CatalogBackend, CatalogError};
use crate::models::ProductDraft;

const SAMPLE_PRODUCTS: &str = include_str!("../../data/sample_products.json");

/// Errors from seeding a catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("sample data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sample product rejected: {0}")]
    Catalog(#[from] CatalogError),
}

/// The bundled sample drafts, in display order.
///
/// # Errors
///
/// Returns `SeedError::Parse` if the bundled JSON is malformed.
pub fn sample_drafts() -> Result<Vec<ProductDraft>, SeedError> {
    Ok(serde_json::from_str(SAMPLE_PRODUCTS)?)
}

/// Create every sample product in `catalog`. Returns how many were added.
///
/// # Errors
///
/// Returns `SeedError` if the data cannot be parsed or a draft is rejected.
pub fn seed<B: CatalogBackend>(catalog: &mut Catalog<B>) -> Result<usize, SeedError> {
    let drafts = sample_drafts()?;
    let count = drafts.len();
    for draft in drafts {
        catalog.create(draft)?;
    }
    info!(count, "Seeded sample catalog");
    Ok(count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use aachar_core::{CurrencyCode, SpiceLevel};

    use super::*;
    use crate::forms::validate;

    #[test]
    fn test_sample_drafts_are_valid() {
        let drafts = sample_drafts().unwrap();
        assert!(!drafts.is_empty());
        for draft in &drafts {
            assert!(validate(draft).is_empty(), "{} is invalid", draft.name);
        }
    }

    #[test]
    fn test_sample_drafts_cover_every_spice_level() {
        let drafts = sample_drafts().unwrap();
        for level in SpiceLevel::ALL {
            assert!(drafts.iter().any(|d| d.spice_level == level), "missing {level}");
        }
    }

    #[test]
    fn test_seed_keeps_file_order() {
        let mut catalog = Catalog::in_memory(CurrencyCode::INR);
        let count = seed(&mut catalog).unwrap();

        let names: Vec<_> = catalog.list().unwrap().into_iter().map(|p| p.name).collect();
        let expected: Vec<_> = sample_drafts().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(count, names.len());
        assert_eq!(names, expected);
    }
}
