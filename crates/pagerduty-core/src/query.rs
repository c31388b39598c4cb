//! Convenience builder for HTTP query parameters.
//!
//! Collects URL query pairs from optional values, eliding anything absent or empty.
//! Multi-valued options use PagerDuty's bracketed-array form (`key[]=a&key[]=b`).

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Append a string value unless it is absent or empty.
    pub fn push_non_empty(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Append every value under `key[]`; an empty slice adds nothing.
    pub fn push_array<T>(&mut self, key: &str, values: &[T])
    where
        T: AsRef<str>,
    {
        let array_key = format!("{key}[]");
        for value in values {
            self.pairs.push((array_key.clone(), value.as_ref().to_string()));
        }
    }

    /// Append `key=true` only when the flag is set.
    pub fn push_flag(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.pairs.push((key.to_string(), "true".to_string()));
        }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Append every pair from another builder.
    pub fn extend(&mut self, other: Self) {
        self.pairs.extend(other.pairs);
    }

    /// Borrow the collected pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode the pairs as an `application/x-www-form-urlencoded` query string.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_pairs(&self.pairs)
    }
}

/// Encode key/value pairs as a query string (without a leading `?`).
#[must_use]
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
