//! Employee record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::types::EmployeeId;
use crate::validate;

/// A Northwind employee.
///
/// The photo is not part of the record; it lives behind the photo
/// sub-resource so that record updates never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    pub title: Option<String>,
    pub title_of_courtesy: Option<String>,
    pub birth_date: Option<NaiveDateTime>,
    pub hire_date: Option<NaiveDateTime>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub home_phone: Option<String>,
    pub extension: Option<String>,
    pub notes: Option<String>,
    pub reports_to: Option<EmployeeId>,
    pub photo_path: Option<String>,
}

impl Employee {
    /// Check the fields a store refuses to persist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidArgument` if either name is blank.
    pub fn validate(&self) -> ServiceResult<()> {
        validate::required("first name", &self.first_name)?;
        validate::required("last name", &self.last_name)
    }

    /// Display name used for blog bylines: `First Last` or `First Last, Title`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}, {}", self.first_name, self.last_name, title),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// Copy every mutable field from `other`, keeping this record's id.
    pub fn overwrite_with(&mut self, other: Self) {
        self.last_name = other.last_name;
        self.first_name = other.first_name;
        self.title = other.title;
        self.title_of_courtesy = other.title_of_courtesy;
        self.birth_date = other.birth_date;
        self.hire_date = other.hire_date;
        self.address = other.address;
        self.city = other.city;
        self.region = other.region;
        self.postal_code = other.postal_code;
        self.country = other.country;
        self.home_phone = other.home_phone;
        self.extension = other.extension;
        self.notes = other.notes;
        self.reports_to = other.reports_to;
        self.photo_path = other.photo_path;
    }
}
