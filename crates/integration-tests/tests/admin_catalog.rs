//! Integration tests for the product catalog.
//!
//! These drive the catalog directly and through the navigator, the way the
//! admin panel does.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use rust_decimal::Decimal;

use aachar_admin::forms::{FormField, validate};
use aachar_admin::models::ProductDraft;
use aachar_admin::navigation::{Navigator, Screen, ViewMode};
use aachar_admin::{Catalog, CatalogError};
use aachar_core::{CurrencyCode, SpiceLevel};
use aachar_integration_tests::{draft_named, mango_pickle};

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_blank_text_fields_flag_only_themselves() {
    let cases: [(FormField, fn(&mut ProductDraft)); 5] = [
        (FormField::Name, |d| d.name = "   ".to_string()),
        (FormField::Description, |d| d.description = String::new()),
        (FormField::Category, |d| d.category = "\t".to_string()),
        (FormField::Weight, |d| d.weight = " ".to_string()),
        (FormField::Ingredients, |d| d.ingredients = " , ,".to_string()),
    ];

    for (field, blank) in cases {
        let mut draft = mango_pickle();
        blank(&mut draft);
        let errors = validate(&draft);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field], "{field:?}");
    }
}

#[test]
fn test_price_must_be_positive() {
    for cents in [-100, 0] {
        let draft = ProductDraft {
            price: Decimal::new(cents, 2),
            ..mango_pickle()
        };
        let errors = validate(&draft);
        assert_eq!(errors.get(FormField::Price), Some("Price must be greater than 0"));
    }

    let draft = ProductDraft {
        price: Decimal::new(1, 2),
        ..mango_pickle()
    };
    assert!(validate(&draft).is_empty());
}

// =============================================================================
// Store
// =============================================================================

#[test]
fn test_mango_pickle_end_to_end() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    assert!(catalog.list().unwrap().is_empty());

    catalog.create(mango_pickle()).unwrap();

    let products = catalog.list().unwrap();
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.name, "Mango Pickle");
    assert_eq!(product.description, "Spicy");
    assert_eq!(product.price.amount, Decimal::from(150));
    assert_eq!(product.price.to_string(), "₹150.00");
    assert_eq!(product.category, "Fruit");
    assert_eq!(product.ingredients, vec!["Mango", "Salt", "Chili"]);
    assert_eq!(product.spice_level, SpiceLevel::Hot);
    assert_eq!(product.weight, "500g");
    assert!(product.in_stock);
    assert!(!product.featured);
    assert_eq!(product.image_url, None);
    assert_eq!(product.created_at, product.updated_at);
}

#[test]
fn test_ingredient_split_drops_empty_segments() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let draft = ProductDraft {
        ingredients: "Mango, Salt,  , Chili".to_string(),
        ..mango_pickle()
    };
    let product = catalog.create(draft).unwrap();
    assert_eq!(product.ingredients, vec!["Mango", "Salt", "Chili"]);
}

#[test]
fn test_create_assigns_unique_ids() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let mut seen = HashSet::new();
    for i in 0..50 {
        let product = catalog.create(draft_named(&format!("Pickle {i}"))).unwrap();
        assert!(seen.insert(product.id));
    }
    assert_eq!(catalog.list().unwrap().len(), 50);
}

#[test]
fn test_invalid_create_leaves_catalog_unchanged() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let err = catalog.create(ProductDraft::default()).unwrap_err();
    let CatalogError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.len(), 6);
    assert!(catalog.list().unwrap().is_empty());
}

#[test]
fn test_update_preserves_position_and_identity() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let first = catalog.create(draft_named("Lemon Pickle")).unwrap();
    let middle = catalog.create(draft_named("Garlic Pickle")).unwrap();
    let last = catalog.create(draft_named("Chili Pickle")).unwrap();

    let updated = catalog
        .update(
            middle.id,
            ProductDraft {
                price: Decimal::from(175),
                ..draft_named("Garlic Pickle (Large)")
            },
        )
        .unwrap();

    assert_eq!(updated.id, middle.id);
    assert_eq!(updated.created_at, middle.created_at);
    assert!(updated.updated_at >= middle.updated_at);

    let ids: Vec<_> = catalog.list().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first.id, middle.id, last.id]);
    assert_eq!(catalog.get(middle.id).unwrap().name, "Garlic Pickle (Large)");
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let gone = catalog.create(mango_pickle()).unwrap();
    catalog.delete(gone.id).unwrap();

    let err = catalog.update(gone.id, mango_pickle()).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id == gone.id));
}

#[test]
fn test_delete_twice_is_noop() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let keep = catalog.create(draft_named("Lemon Pickle")).unwrap();
    let doomed = catalog.create(mango_pickle()).unwrap();

    assert!(catalog.delete(doomed.id).unwrap());
    assert!(!catalog.delete(doomed.id).unwrap());

    let products = catalog.list().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, keep.id);
}

// =============================================================================
// Navigation over the store
// =============================================================================

#[test]
fn test_failed_submit_stays_on_form_with_errors() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let mut nav = Navigator::new();

    nav.show_create()
        .set_field(FormField::Name, "Mango Pickle")
        .unwrap();
    assert!(nav.submit(&mut catalog).is_err());

    let form = nav.form().unwrap();
    assert!(form.errors().contains(FormField::Weight));
    assert!(!form.errors().contains(FormField::Name));
    assert!(catalog.list().unwrap().is_empty());

    nav.form_mut()
        .unwrap()
        .set_field(FormField::Weight, "500g")
        .unwrap();
    assert!(!nav.form().unwrap().errors().contains(FormField::Weight));
}

#[test]
fn test_edit_round_trip_keeps_view_mode() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let product = catalog.create(mango_pickle()).unwrap();
    let mut nav = Navigator::new();
    nav.set_view_mode(ViewMode::List);

    let form = nav.edit(product.clone()).unwrap();
    assert_eq!(form.draft().ingredients, "Mango, Salt, Chili");
    form.set_field(FormField::Featured, "yes").unwrap();

    let saved = nav.submit(&mut catalog).unwrap();
    assert!(saved.featured);
    assert_eq!(saved.id, product.id);
    assert!(matches!(nav.screen(), Screen::Viewing));
    assert_eq!(nav.view_mode(), ViewMode::List);
}

#[test]
fn test_cancel_discards_draft() {
    let mut catalog = Catalog::in_memory(CurrencyCode::INR);
    let product = catalog.create(mango_pickle()).unwrap();
    let mut nav = Navigator::new();

    nav.edit(product.clone())
        .unwrap()
        .set_field(FormField::Price, "999")
        .unwrap();
    nav.cancel().unwrap();

    assert!(!nav.is_editing());
    assert_eq!(catalog.get(product.id).unwrap(), product);
}
