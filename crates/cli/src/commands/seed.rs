//! Load a YAML fixture into the database.
//!
//! Records go through the same service layer the API uses, so they are
//! validated the same way and receive database-assigned ids.

use std::path::Path;

use northwind_api::seed;

use super::{CommandError, connect};

/// Seed the database from `file_path`.
///
/// The fixture is parsed before connecting, so a malformed file never
/// touches the database.
///
/// # Errors
///
/// Returns `CommandError` if the file cannot be read or parsed, the
/// connection fails, or the store rejects a record.
pub async fn run(file_path: &Path) -> Result<(), CommandError> {
    tracing::info!(path = %file_path.display(), "Loading fixture");
    let fixture = seed::read_fixture(file_path).await?;
    tracing::info!(records = fixture.len(), "Parsed fixture");

    let services = connect().await?;
    let summary = fixture.load_into(&services).await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Categories: {}", summary.categories);
    tracing::info!("  Customers: {}", summary.customers);
    tracing::info!("  Employees: {}", summary.employees);
    tracing::info!("  Products: {}", summary.products);
    tracing::info!("  Articles: {}", summary.articles);
    tracing::info!("  Comments: {}", summary.comments);
    tracing::info!("  Article products: {}", summary.article_products);

    if !summary.skipped_customers.is_empty() {
        tracing::warn!(
            "  Skipped existing customers: {}",
            summary.skipped_customers.join(", ")
        );
    }

    Ok(())
}
