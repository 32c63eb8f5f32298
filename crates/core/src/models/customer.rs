//! Customer record.

use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::CustomerId;
use crate::validate;

/// A Northwind customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub company_name: String,
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
}

impl Customer {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if the company name is blank.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("company name", &self.company_name)
    }

    /// Copy every mutable field from `other`, keeping this record's id.
    pub fn overwrite_with(&mut self, other: Self) {
        self.company_name = other.company_name;
        self.contact_name = other.contact_name;
        self.contact_title = other.contact_title;
        self.address = other.address;
        self.city = other.city;
        self.region = other.region;
        self.postal_code = other.postal_code;
        self.country = other.country;
        self.phone = other.phone;
        self.fax = other.fax;
    }
}
