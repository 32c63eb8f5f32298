//! Domain records.
//!
//! These are the shapes the service traits accept and return. Stores convert
//! their own row types into these with explicit `From` impls.

pub mod blog;
pub mod category;
pub mod customer;
pub mod employee;
pub mod product;

pub use blog::{BlogArticle, BlogArticleProduct, BlogComment};
pub use category::ProductCategory;
pub use customer::Customer;
pub use employee::Employee;
pub use product::Product;
