//! Errors surfaced by the service traits.
//!
//! Absence is not an error here: lookups return `Option`, updates and
//! deletes return `bool`, and creates return `Option<Id>` when the store
//! declines the insert.

use thiserror::Error;

use crate::blob::BlobError;

/// Error returned by every service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller passed an argument the service refuses to act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A binary payload exceeds the configured maximum.
    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Stored data cannot be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    /// Wrap a backend error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

impl From<BlobError> for ServiceError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::TooLarge { len, max } => Self::PayloadTooLarge { len, max },
            BlobError::Truncated { .. } => Self::DataCorruption(err.to_string()),
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
