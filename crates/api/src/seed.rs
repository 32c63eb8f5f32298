//! YAML fixtures for populating a store.
//!
//! A fixture lists records with the ids they had at the source. Records are
//! created through the service traits, so each store assigns its own integer
//! ids; references between records (category of a product, author of an
//! article, manager of an employee, ...) are remapped to the assigned ids.
//! Customer codes are kept as they are.
//!
//! ```yaml
//! categories:
//!   - id: 1
//!     name: Beverages
//! products:
//!   - id: 1
//!     name: Chai
//!     categoryId: 1
//!     discontinued: false
//! ```

use std::collections::HashMap;
use std::path::Path;

use northwind_core::{
    ArticleId, BlogArticle, BlogComment, BloggingService, CategoryId, CategoryService, Customer,
    CustomerService, Employee, EmployeeId, EmployeeService, Product, ProductCategory, ProductId,
    ProductService, ServiceError,
};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a fixture.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The fixture refers to a record it does not contain, or the store
    /// refused a record.
    #[error("fixture rejected: {0}")]
    Rejected(String),
}

/// An article/product link in a fixture.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleProductLink {
    pub article_id: ArticleId,
    pub product_id: ProductId,
}

/// Records to load, keyed by the ids they had at the source.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedFixture {
    pub categories: Vec<ProductCategory>,
    pub customers: Vec<Customer>,
    pub employees: Vec<Employee>,
    pub products: Vec<Product>,
    pub articles: Vec<BlogArticle>,
    pub comments: Vec<BlogComment>,
    pub article_products: Vec<ArticleProductLink>,
}

/// What a load created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub customers: usize,
    pub employees: usize,
    pub products: usize,
    pub articles: usize,
    pub comments: usize,
    pub article_products: usize,
    /// Customer codes that already existed and were left alone.
    pub skipped_customers: Vec<String>,
}

/// Read and parse a fixture file.
///
/// # Errors
///
/// Returns `SeedError::Io` if the file cannot be read and `SeedError::Yaml`
/// if it is not a valid fixture.
pub async fn read_fixture(path: impl AsRef<Path>) -> Result<SeedFixture, SeedError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

    SeedFixture::from_yaml(&content)
}

/// Look up the id a source id was remapped to.
fn remap<K>(ids: &HashMap<K, K>, source: K, what: &str) -> Result<K, SeedError>
where
    K: std::hash::Hash + Eq + Copy + std::fmt::Display,
{
    ids.get(&source)
        .copied()
        .ok_or_else(|| SeedError::Rejected(format!("unknown {what} {source}")))
}

impl SeedFixture {
    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Yaml` if the text is not a valid fixture.
    pub fn from_yaml(content: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Total number of records in the fixture.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
            + self.customers.len()
            + self.employees.len()
            + self.products.len()
            + self.articles.len()
            + self.comments.len()
            + self.article_products.len()
    }

    /// Whether the fixture has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create every record through `services`.
    ///
    /// Loading stops at the first record the store rejects; whatever was
    /// created before that point stays.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Rejected` for dangling references or records the
    /// store declines, and `SeedError::Service` for store failures.
    pub async fn load_into<S>(self, services: &S) -> Result<SeedSummary, SeedError>
    where
        S: CustomerService + EmployeeService + ProductService + CategoryService + BloggingService,
    {
        let mut summary = SeedSummary::default();

        let mut category_ids: HashMap<CategoryId, CategoryId> = HashMap::new();
        for category in self.categories {
            let source = category.id;
            let id = services
                .create_category(category)
                .await?
                .ok_or_else(|| SeedError::Rejected(format!("category {source}")))?;
            category_ids.insert(source, id);
            summary.categories += 1;
        }

        for customer in self.customers {
            let code = customer.id.to_string();
            if services.create_customer(customer).await?.is_some() {
                summary.customers += 1;
            } else {
                tracing::warn!(customer_id = %code, "customer already exists, skipping");
                summary.skipped_customers.push(code);
            }
        }

        // Managers may appear after their reports, so `reports_to` is filled
        // in once every employee has an id.
        let mut employee_ids: HashMap<EmployeeId, EmployeeId> = HashMap::new();
        let mut managed = Vec::new();
        for mut employee in self.employees {
            let source = employee.id;
            let manager = employee.reports_to.take();
            let id = services
                .create_employee(employee.clone())
                .await?
                .ok_or_else(|| SeedError::Rejected(format!("employee {source}")))?;
            employee_ids.insert(source, id);
            if let Some(manager) = manager {
                employee.id = id;
                managed.push((employee, manager));
            }
            summary.employees += 1;
        }
        assign_managers(services, managed, &employee_ids).await?;

        let mut product_ids: HashMap<ProductId, ProductId> = HashMap::new();
        for mut product in self.products {
            let source = product.id;
            product.category_id = product
                .category_id
                .map(|category| remap(&category_ids, category, "category"))
                .transpose()?;
            let id = services
                .create_product(product)
                .await?
                .ok_or_else(|| SeedError::Rejected(format!("product {source}")))?;
            product_ids.insert(source, id);
            summary.products += 1;
        }

        let mut article_ids: HashMap<ArticleId, ArticleId> = HashMap::new();
        for mut article in self.articles {
            let source = article.id;
            article.author_id = remap(&employee_ids, article.author_id, "employee")?;
            let id = services
                .create_article(article)
                .await?
                .ok_or_else(|| SeedError::Rejected(format!("article {source}")))?;
            article_ids.insert(source, id);
            summary.articles += 1;
        }

        for mut comment in self.comments {
            let source = comment.id;
            comment.article_id = remap(&article_ids, comment.article_id, "article")?;
            services
                .create_comment(comment)
                .await?
                .ok_or_else(|| SeedError::Rejected(format!("comment {source}")))?;
            summary.comments += 1;
        }

        for link in self.article_products {
            let article_id = remap(&article_ids, link.article_id, "article")?;
            let product_id = remap(&product_ids, link.product_id, "product")?;
            if services
                .create_related_product(article_id, product_id)
                .await?
                .is_some()
            {
                summary.article_products += 1;
            }
        }

        tracing::info!(
            categories = summary.categories,
            customers = summary.customers,
            employees = summary.employees,
            products = summary.products,
            articles = summary.articles,
            comments = summary.comments,
            article_products = summary.article_products,
            "fixture loaded"
        );

        Ok(summary)
    }
}

/// Point each created employee at its manager's assigned id.
async fn assign_managers<S: EmployeeService>(
    services: &S,
    managed: Vec<(Employee, EmployeeId)>,
    employee_ids: &HashMap<EmployeeId, EmployeeId>,
) -> Result<(), SeedError> {
    for (mut employee, manager) in managed {
        let id = employee.id;
        employee.reports_to = Some(remap(employee_ids, manager, "employee")?);
        if !services.update_employee(id, employee).await? {
            return Err(SeedError::Rejected(format!("employee {id}")));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use northwind_core::{CommentId, Page};

    use super::*;
    use crate::services::Services;

    const FIXTURE: &str = r"
categories:
  - id: 7
    name: Produce
  - id: 8
    name: Seafood
customers:
  - id: ALFKI
    companyName: Alfreds Futterkiste
  - id: ALFKI
    companyName: Duplicate Code
employees:
  - id: 5
    firstName: Steven
    lastName: Buchanan
    reportsTo: 2
  - id: 2
    firstName: Andrew
    lastName: Fuller
products:
  - id: 10
    name: Ikura
    categoryId: 8
    discontinued: false
  - id: 14
    name: Tofu
    categoryId: 7
    discontinued: false
articles:
  - id: 3
    title: Fresh fish
    text: Ikura is back.
    authorId: 5
comments:
  - id: 9
    text: Great news
    authorId: ALFKI
    articleId: 3
articleProducts:
  - articleId: 3
    productId: 10
";

    #[tokio::test]
    async fn test_load_remaps_references() {
        let services = Services::in_memory(1024);
        let fixture = SeedFixture::from_yaml(FIXTURE).unwrap();
        assert_eq!(fixture.len(), 11);

        let summary = fixture.load_into(&services).await.unwrap();
        assert_eq!(summary.categories, 2);
        assert_eq!(summary.customers, 1);
        assert_eq!(summary.skipped_customers, vec!["ALFKI".to_string()]);
        assert_eq!(summary.employees, 2);
        assert_eq!(summary.article_products, 1);

        // Source id 5 was created first and got id 1; its manager (source 2) got id 2.
        let steven = services.get_employee(EmployeeId::new(1)).await.unwrap().unwrap();
        assert_eq!(steven.first_name, "Steven");
        assert_eq!(steven.reports_to, Some(EmployeeId::new(2)));

        let ikura = services.get_product(ProductId::new(1)).await.unwrap().unwrap();
        assert_eq!(ikura.category_id, Some(CategoryId::new(2)));

        let article = services.get_article(ArticleId::new(1)).await.unwrap().unwrap();
        assert_eq!(article.author_id, EmployeeId::new(1));

        let comments = services
            .list_comments(ArticleId::new(1), Page::default())
            .await
            .unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments.first().unwrap().id, CommentId::new(1));

        let links = services
            .list_related_products(ArticleId::new(1))
            .await
            .unwrap();
        assert_eq!(links.first().unwrap().product_id, ProductId::new(1));
    }

    #[tokio::test]
    async fn test_dangling_reference_is_rejected() {
        let services = Services::in_memory(1024);
        let fixture = SeedFixture::from_yaml(
            r"
products:
  - id: 1
    name: Chai
    categoryId: 99
    discontinued: false
",
        )
        .unwrap();

        let err = fixture.load_into(&services).await.unwrap_err();
        assert!(matches!(err, SeedError::Rejected(message) if message == "unknown category 99"));
    }

    #[tokio::test]
    async fn test_bundled_fixture_loads() {
        let services = Services::in_memory(1024);
        let fixture = SeedFixture::from_yaml(include_str!("../fixtures/northwind.yaml")).unwrap();

        let summary = fixture.load_into(&services).await.unwrap();
        assert_eq!(summary.customers, 3);
        assert_eq!(summary.products, 5);
        assert_eq!(summary.article_products, 4);
        assert!(summary.skipped_customers.is_empty());
        assert_eq!(services.count_comments(ArticleId::new(1)).await.unwrap(), 2);
    }

    #[test]
    fn test_empty_fixture() {
        let fixture = SeedFixture::from_yaml("{}").unwrap();
        assert!(fixture.is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let err = read_fixture("/nonexistent/northwind.yaml").await.unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[tokio::test]
    async fn test_lost_manager_link_is_rejected() {
        let services = Services::in_memory(1024);
        let employee: Employee =
            serde_json::from_str(r#"{"id":4,"firstName":"Margaret","lastName":"Peacock"}"#)
                .unwrap();
        let employee_ids = HashMap::from([(EmployeeId::new(2), EmployeeId::new(1))]);

        // Employee 4 was never created, so the update finds nothing to change.
        let err = assign_managers(&services, vec![(employee, EmployeeId::new(2))], &employee_ids)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Rejected(message) if message == "employee 4"));
    }
}
