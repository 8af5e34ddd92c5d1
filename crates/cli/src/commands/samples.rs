//! Print the sample catalog an admin session starts with.

use std::io::Write;

use aachar_admin::Catalog;
use aachar_admin::catalog::seed;
use aachar_admin::navigation::ViewMode;
use aachar_core::CurrencyCode;

use crate::render;

/// Write the sample products, as JSON drafts or as a list.
///
/// # Errors
///
/// Returns an error if the bundled samples do not load or output fails.
pub fn print(
    out: &mut impl Write,
    currency: CurrencyCode,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let drafts = seed::sample_drafts()?;
        serde_json::to_writer_pretty(&mut *out, &drafts)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut catalog = Catalog::in_memory(currency);
    seed::seed(&mut catalog)?;
    render::product_list(out, &catalog.list()?, catalog.stats()?, ViewMode::List)?;
    Ok(())
}
