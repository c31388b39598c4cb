//! Strongly-typed identifiers for PagerDuty resources.
//!
//! PagerDuty identifiers are short opaque strings (e.g. `PABC123`). Wrapping them per
//! resource prevents passing a rule ID where a policy ID is expected, and parsing keeps
//! them safe to splice into request paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed identifier wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parses an identifier, rejecting values that are not path-safe.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is empty or contains characters other than
            /// ASCII letters, digits, `-` or `_`.
            pub fn parse_str(input: &str) -> Result<Self> {
                validate_id(input).map(|id| Self(id.to_string()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Converts into the inner string.
            #[must_use]
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                validate_id(&value)?;
                Ok(Self(value))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::parse_str(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type!(EscalationPolicyId, "Escalation policy identifier");
id_type!(EscalationRuleId, "Escalation rule identifier");
id_type!(ExtensionId, "Extension identifier");
id_type!(ExtensionSchemaId, "Extension schema identifier");
id_type!(ServiceId, "Service identifier");

/// Validates an identifier string.
///
/// # Errors
///
/// Returns an error if the string is empty or not path-safe.
pub fn validate_id(s: &str) -> Result<&str> {
    let valid = !s.is_empty()
        && s
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(s)
    } else {
        Err(Error::InvalidId(s.to_string()))
    }
}
