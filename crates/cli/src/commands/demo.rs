//! Scripted walkthrough of the admin flow.
//!
//! Signs in, rejects an incomplete form, creates a product, edits it,
//! switches presentation and deletes it again.

use std::io::Write;

use tracing::info;

use aachar_admin::forms::{FormField, LoginForm};
use aachar_admin::services::IdentityProvider;
use aachar_admin::{AdminSession, AppError};

use crate::render;

const MANGO_PICKLE: &[(FormField, &str)] = &[
    (FormField::Description, "Sun-cured raw mango in mustard oil"),
    (FormField::Price, "150"),
    (FormField::Category, "Fruit"),
    (FormField::Ingredients, "Mango, Salt,  , Chili"),
    (FormField::SpiceLevel, "Hot"),
    (FormField::Weight, "500g"),
    (FormField::Featured, "yes"),
];

/// Run the walkthrough, narrating to `out`.
///
/// # Errors
///
/// Returns the first unexpected admin error or output failure.
pub async fn run<P: IdentityProvider>(
    mut session: AdminSession<P>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "Signing in as admin@aachar.in...")?;
    out.flush()?;
    let identity = session
        .login(LoginForm::new("admin@aachar.in", "demo-password"))
        .await?;
    render::identity(out, &identity)?;

    let panel = session.panel_mut()?;
    let before = panel.stats()?.total;

    panel.show_create();
    panel.set_field(FormField::Name, "Mango Pickle")?;
    match panel.submit() {
        Err(e @ AppError::Catalog(_)) if e.field_errors().is_some() => {
            writeln!(out, "Incomplete form rejected:")?;
            if let Some(errors) = e.field_errors() {
                render::field_errors(out, errors)?;
            }
        }
        Err(e) => return Err(e.into()),
        Ok(product) => return Err(format!("incomplete form saved as {}", product.id).into()),
    }

    for (field, value) in MANGO_PICKLE {
        panel.set_field(*field, value)?;
    }
    let created = panel.submit()?;
    info!(product_id = %created.id, "Demo product created");
    writeln!(out, "Created {} at {}", created.name, created.price)?;

    panel.edit(created.id)?;
    panel.set_field(FormField::Price, "175")?;
    let updated = panel.submit()?;
    writeln!(out, "Updated price to {}", updated.price)?;

    let mode = panel.toggle_view_mode();
    writeln!(out, "View: {mode:?}")?;
    render::product_list(out, &panel.products()?, panel.stats()?, mode)?;

    panel.delete(created.id)?;
    writeln!(
        out,
        "Deleted {}; {} products remain (started with {before})",
        created.name,
        panel.stats()?.total
    )?;

    session.logout();
    writeln!(out, "Signed out.")?;
    Ok(())
}
