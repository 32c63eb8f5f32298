//! In-process store.
//!
//! Every table is a `BTreeMap` keyed by the record id, so listings come out in
//! id order just like the SQL store's `ORDER BY id`. All tables sit behind one
//! `tokio::sync::RwLock`; each operation takes the lock once and releases it
//! before returning. Integer ids come from [`northwind_core::allocator`].
//!
//! Pictures and photos are stored encoded (reserved header included), exactly
//! as they would be in the database.

mod blogging;
mod categories;
mod customers;
mod employees;
mod products;

use std::collections::BTreeMap;

use northwind_core::{
    ArticleId, ArticleProductId, BlogArticle, BlogArticleProduct, BlogComment, CategoryId,
    CommentId, Customer, CustomerId, Employee, EmployeeId, Product, ProductCategory, ProductId,
    ReservedHeaderCodec,
};
use tokio::sync::RwLock;

/// A record together with its encoded binary column.
#[derive(Debug, Clone)]
struct WithBlob<T> {
    record: T,
    blob: Option<Vec<u8>>,
}

impl<T> WithBlob<T> {
    const fn new(record: T) -> Self {
        Self { record, blob: None }
    }
}

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<CustomerId, Customer>,
    employees: BTreeMap<EmployeeId, WithBlob<Employee>>,
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, WithBlob<ProductCategory>>,
    articles: BTreeMap<ArticleId, BlogArticle>,
    comments: BTreeMap<CommentId, BlogComment>,
    article_products: BTreeMap<ArticleProductId, BlogArticleProduct>,
}

/// In-memory implementation of every service trait.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    codec: ReservedHeaderCodec,
}

impl MemoryStore {
    /// Create an empty store that accepts pictures up to `picture_max_file_size` bytes.
    #[must_use]
    pub fn new(picture_max_file_size: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            codec: ReservedHeaderCodec::new(picture_max_file_size),
        }
    }
}

/// Row count as reported by the count operations.
fn row_count<K, V>(table: &BTreeMap<K, V>) -> u64 {
    u64::try_from(table.len()).unwrap_or(u64::MAX)
}
