//! Core types for the Northwind admin service.
//!
//! This module provides type-safe wrappers for keys and paging parameters.

pub mod customer_id;
pub mod id;
pub mod page;

pub use customer_id::{CustomerId, CustomerIdError};
pub use id::*;
pub use page::Page;
