//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                   - Liveness
//! GET  /health/ready                             - Readiness (store reachable)
//!
//! # Customers, employees, products, categories
//! GET    /api/{resource}?offset&limit            - List (default 0/10)
//! GET    /api/{resource}/count                   - Row count
//! GET    /api/{resource}/{id}                    - Get
//! POST   /api/{resource}                         - Create -> 201 | 409
//! PUT    /api/{resource}/{id}                    - Update -> 204 | 404 | 400
//! DELETE /api/{resource}/{id}                    - Delete -> 204 | 404
//!
//! GET|PUT|DELETE /api/employees/{id}/photo       - image/bmp
//! GET|PUT|DELETE /api/categories/{id}/picture    - image/jpeg
//! GET  /api/products/lookup?name=..&name=..      - Name lookup
//! GET  /api/categories/lookup?name=..            - Name lookup
//! GET  /api/products/category/{category_id}      - Products of a category
//!
//! # Blogging
//! GET|POST /api/articles                         - Short info listing, create
//! GET  /api/articles/count
//! GET|PUT|DELETE /api/articles/{id}              - Full info, update, cascade delete
//! GET  /api/articles/{id}/products               - Related products
//! POST|DELETE /api/articles/{id}/products/{product_id}
//! GET|POST /api/articles/{id}/comments
//! GET  /api/articles/{id}/comments/count
//! GET|PUT|DELETE /api/articles/{id}/comments/{comment_id}
//! ```

pub mod articles;
pub mod categories;
pub mod customers;
pub mod employees;
pub mod extract;
pub mod health;
pub mod products;

use axum::{Router, http::header::CONTENT_TYPE, response::IntoResponse};

use crate::state::AppState;

/// Build the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(employees::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(articles::router())
}

/// Raw image bytes with a fixed content type.
fn picture_response(content_type: &'static str, bytes: Vec<u8>) -> impl IntoResponse {
    ([(CONTENT_TYPE, content_type)], bytes)
}
