//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a pizza (catalog surrogate key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PizzaId(i64);

/// Identifier of a topping (catalog surrogate key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a raw key. Keys are assigned by the catalog and are always positive.
            pub fn new(raw: i64) -> Result<Self, DomainError> {
                if raw <= 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, raw
                    )));
                }
                Ok(Self(raw))
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $t {
            type Error = DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(raw)
            }
        }
    };
}

impl_int_newtype!(PizzaId, "PizzaId");
impl_int_newtype!(ToppingId, "ToppingId");

/// Longest session identifier accepted from a gateway.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque session identifier supplied by the USSD gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("SessionId: must not be empty"));
        }
        if trimmed.chars().count() > MAX_SESSION_ID_LEN {
            return Err(DomainError::invalid_id(format!(
                "SessionId: longer than {MAX_SESSION_ID_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SessionId> for String {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

/// Customer-facing order reference (e.g. `OR202610161230450001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Wrap an order number produced by an order sink.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_must_be_positive() {
        assert!(PizzaId::new(1).is_ok());
        assert!(matches!(PizzaId::new(0), Err(DomainError::InvalidId(_))));
        assert!(matches!(ToppingId::new(-4), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn catalog_ids_parse_from_strings() {
        let id: ToppingId = " 42 ".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("abc".parse::<PizzaId>().is_err());
    }

    #[test]
    fn session_id_is_trimmed_and_bounded() {
        let id = SessionId::parse("  ATUid_123 ").unwrap();
        assert_eq!(id.as_str(), "ATUid_123");

        assert!(SessionId::parse("   ").is_err());
        assert!(SessionId::parse("x".repeat(MAX_SESSION_ID_LEN + 1)).is_err());
    }

    #[test]
    fn session_id_limit_counts_characters() {
        let wide = "é".repeat(MAX_SESSION_ID_LEN);
        assert!(wide.len() > MAX_SESSION_ID_LEN);
        assert!(SessionId::parse(&wide).is_ok());
        assert!(SessionId::parse(format!("{wide}é")).is_err());
    }

    #[test]
    fn session_id_serde_rejects_blank_values() {
        let ok: SessionId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(ok.as_str(), "abc");
        assert!(serde_json::from_str::<SessionId>("\"\"").is_err());
    }
}
