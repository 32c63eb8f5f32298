//! Northwind API library.
//!
//! REST administration service over the Northwind dataset: customers,
//! employees (with photos), products, categories (with pictures) and a small
//! blog whose articles are written by employees.
//!
//! The service layer is selected at start-up (`NORTHWIND_SERVICE_TYPE`):
//! an in-process store or `PostgreSQL`. Handlers only ever see
//! [`services::Services`], so the HTTP behaviour is identical for both.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;

use axum::{Router, extract::DefaultBodyLimit};

use state::AppState;

/// Multipart framing allowance on top of the largest accepted picture.
const UPLOAD_OVERHEAD: usize = 64 * 1024;

/// Build the application router without transport layers (tracing, Sentry).
///
/// The request body limit follows `picture_max_file_size`, so oversized
/// pictures reach the codec and are refused with 413 there.
pub fn app(state: AppState) -> Router {
    let body_limit = state
        .config()
        .picture_max_file_size
        .saturating_add(UPLOAD_OVERHEAD);

    routes::routes()
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
