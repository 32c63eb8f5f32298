//! Customer code type.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`CustomerId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdError {
    /// The input string is empty.
    #[error("customer id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("customer id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than ASCII letters and digits.
    #[error("customer id must contain only ASCII letters and digits")]
    InvalidCharacter,
}

/// A Northwind customer code such as `ALFKI`.
///
/// Unlike the integer-keyed tables, customers are keyed by a short code the
/// client chooses at creation time.
///
/// ## Constraints
///
/// - Length: 1-5 characters
/// - ASCII letters and digits only
///
/// ## Examples
///
/// ```
/// use northwind_core::CustomerId;
///
/// assert!(CustomerId::parse("ALFKI").is_ok());
/// assert!(CustomerId::parse("").is_err());
/// assert!(CustomerId::parse("TOOLONG").is_err());
/// assert!(CustomerId::parse("AL-KI").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Maximum length of a customer code (`nchar(5)` in the reference schema).
    pub const MAX_LENGTH: usize = 5;

    /// Parse a `CustomerId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 5 characters, or
    /// contains anything other than ASCII alphanumerics.
    pub fn parse(s: &str) -> Result<Self, CustomerIdError> {
        if s.is_empty() {
            return Err(CustomerIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(CustomerIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CustomerIdError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CustomerId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::str::FromStr for CustomerId {
    type Err = CustomerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CustomerId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CustomerId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // bpchar columns come back space padded
        Ok(Self::parse(raw.trim_end())?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CustomerId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(CustomerId::parse("ALFKI").is_ok());
        assert!(CustomerId::parse("BONAP").is_ok());
        assert!(CustomerId::parse("A1").is_ok());
        assert!(CustomerId::parse("x").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(CustomerId::parse(""), Err(CustomerIdError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            CustomerId::parse("ABCDEF"),
            Err(CustomerIdError::TooLong { max: 5 })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            CustomerId::parse("AB CD"),
            Err(CustomerIdError::InvalidCharacter)
        ));
        assert!(matches!(
            CustomerId::parse("ÄLFK"),
            Err(CustomerIdError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CustomerId = serde_json::from_str("\"ANTON\"").unwrap();
        assert_eq!(ok.as_str(), "ANTON");

        let err = serde_json::from_str::<CustomerId>("\"TOO-LONG\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_display() {
        let id = CustomerId::parse("WOLZA").unwrap();
        assert_eq!(id.to_string(), "WOLZA");
    }
}
