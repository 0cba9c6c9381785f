//! Untyped query parameters.

use std::collections::HashMap;

use super::error::ValidationError;

/// Query parameters of an inbound request, keyed by name.
///
/// Parsing never fails: malformed pairs are decoded leniently and when a
/// key repeats the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    pub fn parse(raw: Option<&str>) -> Self {
        let mut map = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            map.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self(map)
    }

    /// Get a parameter, treating an empty value as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Get every named parameter, or fail listing all the missing ones.
    pub fn require<const N: usize>(
        &self,
        keys: [&'static str; N],
    ) -> Result<[&str; N], ValidationError> {
        let missing: Vec<&'static str> = keys
            .iter()
            .copied()
            .filter(|k| self.get(k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingParams(missing));
        }
        Ok(keys.map(|k| self.get(k).unwrap_or_default()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HashMap::new();
        for (key, value) in iter {
            map.entry(key.into()).or_insert_with(|| value.into());
        }
        Self(map)
    }
}
