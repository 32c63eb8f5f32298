//! Product category record.

use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::CategoryId;
use crate::validate;

/// A product category. The picture is served through its own sub-resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    #[serde(default)]
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}

impl ProductCategory {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if the name is blank.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("category name", &self.name)
    }

    /// Case-insensitive exact match against any of `names`.
    #[must_use]
    pub fn matches_any_name(&self, names: &[String]) -> bool {
        let own = self.name.to_lowercase();
        names.iter().any(|name| name.to_lowercase() == own)
    }

    /// Copy every mutable field from `other`, keeping this record's id.
    pub fn overwrite_with(&mut self, other: Self) {
        self.name = other.name;
        self.description = other.description;
    }
}
