//! Process configuration.
//!
//! Everything is read from the environment once, at startup. Credentials
//! are optional here: a missing key only fails requests to the endpoint
//! that needs it.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::stations::{StationError, StationTable};
use crate::upstream::{Credential, UpstreamConfig};

/// Subway API credential.
pub const SUBWAY_KEY_VAR: &str = "KRIC_KEY";
/// Intercity API credential.
pub const INTERCITY_KEY_VAR: &str = "TAGO_KEY";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const TIMEOUT_VAR: &str = "UPSTREAM_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "UPSTREAM_USER_AGENT";
/// JSON file replacing the built-in station table.
pub const STATION_IDS_VAR: &str = "STATION_IDS_PATH";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors in the process configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to an unusable value
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },

    /// The station table could not be loaded
    #[error(transparent)]
    Stations(#[from] StationError),
}

/// Configuration for the whole proxy process.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Outbound client settings
    pub upstream: UpstreamConfig,
    pub subway_key: Option<Credential>,
    pub intercity_key: Option<Credential>,
    /// Station table file; `None` uses the built-in table
    pub station_ids_path: Option<PathBuf>,
}

impl ProxyConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = lookup(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var: BIND_ADDR_VAR,
                message: e.to_string(),
            })?;

        let mut upstream = UpstreamConfig::new();
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            let secs: u64 = secs.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    message: e.to_string(),
                }
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: TIMEOUT_VAR,
                    message: "must be at least 1 second".to_string(),
                });
            }
            upstream = upstream.with_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = lookup(USER_AGENT_VAR).filter(|ua| !ua.is_empty()) {
            upstream = upstream.with_user_agent(user_agent);
        }

        Ok(Self {
            bind_addr,
            upstream,
            subway_key: lookup(SUBWAY_KEY_VAR).and_then(Credential::new),
            intercity_key: lookup(INTERCITY_KEY_VAR).and_then(Credential::new),
            station_ids_path: lookup(STATION_IDS_VAR)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Load the station table this configuration names.
    pub fn station_table(&self) -> Result<StationTable, ConfigError> {
        let table = match &self.station_ids_path {
            Some(path) => StationTable::from_json_file(path)?,
            None => StationTable::builtin(),
        };
        Ok(table)
    }
}
