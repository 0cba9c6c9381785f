//! Station name → upstream ID table.

use std::collections::HashMap;
use std::path::Path;

use super::error::StationError;

/// Stations offered by the front-end, with their upstream place IDs.
const BUILTIN_STATIONS: &[(&str, &str)] = &[
    ("서울", "NAT010000"),
    ("대전", "NAT011668"),
    ("동대구", "NAT013271"),
    ("밀양", "NAT013841"),
    ("구포", "NAT014281"),
    ("부산", "NAT014445"),
];

/// Immutable station name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationTable {
    ids: HashMap<String, String>,
}

impl StationTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_STATIONS.iter().copied())
    }

    /// Build a table from `(name, id)` pairs.
    pub fn from_entries<N, I>(entries: impl IntoIterator<Item = (N, I)>) -> Self
    where
        N: Into<String>,
        I: Into<String>,
    {
        Self {
            ids: entries
                .into_iter()
                .map(|(name, id)| (name.into(), id.into()))
                .collect(),
        }
    }

    /// Load a table from a JSON object file such as `{"부산": "NAT014445"}`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ids: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|e| StationError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self { ids })
    }

    /// Look up the upstream ID for a station name.
    ///
    /// Names mapped to an empty ID count as unconfigured.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.ids
            .get(name)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Number of entries, configured or not.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
