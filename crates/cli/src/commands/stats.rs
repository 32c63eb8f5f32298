//! Row counts per table.

use northwind_core::{
    BloggingService, CategoryService, CustomerService, EmployeeService, Page, ProductService,
};

use super::{CommandError, connect};

/// Log the number of rows in every table.
///
/// # Errors
///
/// Returns `CommandError` if the connection or a count query fails.
pub async fn run() -> Result<(), CommandError> {
    let services = connect().await?;

    let mut comments = 0;
    for article in services.list_articles(Page::all()).await? {
        comments += services.count_comments(article.id).await?;
    }

    tracing::info!("Northwind Statistics");
    tracing::info!("====================");
    tracing::info!("Customers:  {}", services.count_customers().await?);
    tracing::info!("Employees:  {}", services.count_employees().await?);
    tracing::info!("Products:   {}", services.count_products().await?);
    tracing::info!("Categories: {}", services.count_categories().await?);
    tracing::info!("Articles:   {}", services.count_articles().await?);
    tracing::info!("Comments:   {comments}");

    Ok(())
}
