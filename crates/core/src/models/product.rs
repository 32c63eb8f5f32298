//! Product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::{CategoryId, ProductId, SupplierId};
use crate::validate;

/// A Northwind product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    pub supplier_id: Option<SupplierId>,
    pub category_id: Option<CategoryId>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i16>,
    pub units_on_order: Option<i16>,
    pub reorder_level: Option<i16>,
    #[serde(default)]
    pub discontinued: bool,
}

impl Product {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if the name is blank or a
    /// foreign key is not positive.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("product name", &self.name)?;
        if let Some(category_id) = self.category_id {
            validate::id("category id", category_id)?;
        }
        if let Some(supplier_id) = self.supplier_id {
            validate::id("supplier id", supplier_id)?;
        }
        Ok(())
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
        self.supplier_id = other.supplier_id;
        self.category_id = other.category_id;
        self.quantity_per_unit = other.quantity_per_unit;
        self.unit_price = other.unit_price;
        self.units_in_stock = other.units_in_stock;
        self.units_on_order = other.units_on_order;
        self.reorder_level = other.reorder_level;
        self.discontinued = other.discontinued;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn chai() -> Product {
        serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Chai",
                "supplierId": 1,
                "categoryId": 1,
                "quantityPerUnit": "10 boxes x 20 bags",
                "unitPrice": "18.00",
                "unitsInStock": 39,
                "unitsOnOrder": 0,
                "reorderLevel": 10
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_reference_row() {
        let product = chai();
        assert_eq!(product.unit_price, Some(Decimal::from_str("18.00").unwrap()));
        assert_eq!(product.units_in_stock, Some(39));
        assert!(!product.discontinued);
    }

    #[test]
    fn test_matches_any_name_ignores_case() {
        let product = chai();
        assert!(product.matches_any_name(&["CHAI".to_string()]));
        assert!(product.matches_any_name(&["chang".to_string(), "chai".to_string()]));
        assert!(!product.matches_any_name(&["Cha".to_string()]));
        assert!(!product.matches_any_name(&[]));
    }

    #[test]
    fn test_validate_rejects_bad_foreign_key() {
        let mut product = chai();
        assert!(product.validate().is_ok());

        product.category_id = Some(CategoryId::new(0));
        assert!(product.validate().is_err());
    }
}
