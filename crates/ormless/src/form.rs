//! Decoded form parameters.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Form-encoded request parameters: each key maps to every value supplied
/// for it, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParameters {
    values: BTreeMap<String, Vec<String>>,
}

impl FormParameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` payload.
    ///
    /// Percent escapes and `+` are decoded; malformed escapes are kept
    /// literally, matching the lenient behaviour of browsers.
    #[must_use]
    pub fn parse(encoded: &[u8]) -> Self {
        form_urlencoded::parse(encoded).collect()
    }

    /// Appends a value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Appends every value of `other` after the values already present.
    pub fn merge(&mut self, other: Self) {
        for (key, values) in other.values {
            self.values.entry(key).or_default().extend(values);
        }
    }

    /// Values supplied for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for FormParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::new();
        for (key, value) in iter {
            parameters.append(key, value);
        }
        parameters
    }
}
