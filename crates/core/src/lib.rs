//! Northwind Core - Shared domain library.
//!
//! This crate provides the types and contracts used across the Northwind
//! components:
//! - `api` - REST administration service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure algorithms - no I/O,
//! no database access, no HTTP. Backends live in the `api` crate and
//! implement the traits in [`service`].
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, customer codes and paging
//! - [`models`] - Domain records
//! - [`service`] - Async service traits implemented by every backend
//! - [`allocator`] - Sequential id allocation for stores without key generation
//! - [`blob`] - Reserved-header padding for stored pictures
//! - [`error`] - The service error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod allocator;
pub mod blob;
pub mod error;
pub mod models;
pub mod service;
pub mod types;
pub mod validate;

pub use blob::{BlobError, RESERVED_HEADER_LEN, ReservedHeaderCodec};
pub use error::{ServiceError, ServiceResult};
pub use models::*;
pub use service::*;
pub use types::*;
