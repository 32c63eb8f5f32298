//! Offset/limit paging.

use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};

/// A validated offset/limit window over a listing.
///
/// The only way to build one from caller input is [`Page::new`], so every
/// `Page` a store receives already satisfies `offset >= 0` and `limit >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    offset: u32,
    limit: u32,
}

impl Page {
    /// Limit applied when the caller does not pass one.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Validate caller-supplied paging values.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if `offset` is negative or
    /// `limit` is below 1.
    pub fn new(offset: i64, limit: i64) -> ServiceResult<Self> {
        if offset < 0 {
            return Err(ServiceError::InvalidArgument(format!(
                "offset must be greater than or equal to zero (got {offset})"
            )));
        }
        if limit < 1 {
            return Err(ServiceError::InvalidArgument(format!(
                "limit must be greater than zero (got {limit})"
            )));
        }

        Ok(Self {
            offset: u32::try_from(offset).unwrap_or(u32::MAX),
            limit: u32::try_from(limit).unwrap_or(u32::MAX),
        })
    }

    /// A window covering every row.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            offset: 0,
            limit: u32::MAX,
        }
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Maximum number of rows to return.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply this window to an iterator.
    pub fn apply<I: Iterator>(&self, iter: I) -> std::iter::Take<std::iter::Skip<I>> {
        iter.skip(self.offset as usize).take(self.limit as usize)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_zero_offset() {
        let page = Page::new(0, 1).unwrap();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 1);
    }

    #[test]
    fn test_new_rejects_negative_offset() {
        assert!(matches!(
            Page::new(-1, 10),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_new_rejects_limit_below_one() {
        assert!(matches!(
            Page::new(0, 0),
            Err(ServiceError::InvalidArgument(_))
        ));
        assert!(Page::new(0, -5).is_err());
    }

    #[test]
    fn test_new_clamps_huge_values() {
        let page = Page::new(i64::MAX, i64::MAX).unwrap();
        assert_eq!(page.offset(), u32::MAX);
        assert_eq!(page.limit(), u32::MAX);
    }

    #[test]
    fn test_apply_windows_iterator() {
        let page = Page::new(2, 3).unwrap();
        let window: Vec<i32> = page.apply(1..=10).collect();
        assert_eq!(window, vec![3, 4, 5]);
    }

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
    }
}
