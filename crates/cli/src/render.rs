//! Plain-text rendering of the admin panel.

use std::io::{self, Write};

use aachar_admin::catalog::CatalogStats;
use aachar_admin::forms::{FieldErrors, FormField, ProductForm};
use aachar_admin::models::{Identity, Product, ProductDraft};
use aachar_admin::navigation::ViewMode;

/// Write the list header and every product in `mode`.
pub fn product_list(
    out: &mut impl Write,
    products: &[Product],
    stats: CatalogStats,
    mode: ViewMode,
) -> io::Result<()> {
    if products.is_empty() {
        writeln!(out, "No products yet")?;
        writeln!(out, "Create your first aachar product to get started!")?;
        return Ok(());
    }

    writeln!(
        out,
        "Product Catalog  (total: {}, in stock: {}, featured: {})",
        stats.total, stats.in_stock, stats.featured
    )?;
    for product in products {
        match mode {
            ViewMode::Grid => card(out, product)?,
            ViewMode::List => row(out, product)?,
        }
    }
    Ok(())
}

fn card(out: &mut impl Write, product: &Product) -> io::Result<()> {
    let featured = if product.featured { "  * featured" } else { "" };
    let stock = if product.in_stock { "in stock" } else { "out of stock" };
    writeln!(out)?;
    writeln!(out, "+ {} [{}]{}", product.name, product.spice_level, featured)?;
    writeln!(
        out,
        "| {} - {} - {} - {}",
        product.price, product.weight, product.category, stock
    )?;
    writeln!(out, "| {}", product.description)?;
    writeln!(out, "| Ingredients: {}", product.ingredients.join(", "))?;
    if let Some(url) = &product.image_url {
        writeln!(out, "| Image: {url}")?;
    }
    writeln!(out, "+ id: {}", product.id)
}

fn row(out: &mut impl Write, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "{}  {:<24} {:<18} {:>10}  {:<6} {}",
        product.id,
        product.name,
        product.category,
        product.price.to_string(),
        product.weight,
        product.spice_level
    )
}

/// Write the open form with any inline errors.
pub fn form(out: &mut impl Write, form: &ProductForm) -> io::Result<()> {
    let title = if form.editing().is_some() {
        "Edit Product"
    } else {
        "Create New Product"
    };
    writeln!(out, "{title}")?;

    let draft = form.draft();
    for field in FormField::ALL {
        let marker = if is_required(field) { "*" } else { " " };
        write!(out, "  {:<12}{marker} {}", field.as_str(), field_value(draft, field))?;
        if let Some(message) = form.errors().get(field) {
            write!(out, "   <- {message}")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "set <field> <value>, then submit or cancel")
}

/// Write one line per failed field.
pub fn field_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}

/// Write who is signed in.
pub fn identity(out: &mut impl Write, identity: &Identity) -> io::Result<()> {
    let initial = identity.initial().unwrap_or('?');
    writeln!(
        out,
        "[{initial}] {} <{}> ({})",
        identity.name, identity.email, identity.role
    )
}

const fn is_required(field: FormField) -> bool {
    !matches!(
        field,
        FormField::SpiceLevel | FormField::ImageUrl | FormField::InStock | FormField::Featured
    )
}

fn field_value(draft: &ProductDraft, field: FormField) -> String {
    match field {
        FormField::Name => draft.name.clone(),
        FormField::Description => draft.description.clone(),
        FormField::Price => draft.price.to_string(),
        FormField::Category => draft.category.clone(),
        FormField::Ingredients => draft.ingredients.clone(),
        FormField::SpiceLevel => draft.spice_level.to_string(),
        FormField::Weight => draft.weight.clone(),
        FormField::ImageUrl => draft.image_url.clone(),
        FormField::InStock => yes_no(draft.in_stock).to_string(),
        FormField::Featured => yes_no(draft.featured).to_string(),
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
