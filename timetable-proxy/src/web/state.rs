//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::stations::StationTable;
use crate::upstream::{Endpoint, UpstreamClient, UpstreamError};

/// Shared application state.
///
/// Everything in here is immutable after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    /// Outbound HTTP client
    pub client: Arc<UpstreamClient>,

    /// Subway timetable endpoint
    pub subway: Arc<Endpoint>,

    /// Intercity timetable endpoint
    pub intercity: Arc<Endpoint>,

    /// Intercity station name → ID table
    pub stations: Arc<StationTable>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        client: UpstreamClient,
        subway: Endpoint,
        intercity: Endpoint,
        stations: StationTable,
    ) -> Self {
        Self {
            client: Arc::new(client),
            subway: Arc::new(subway),
            intercity: Arc::new(intercity),
            stations: Arc::new(stations),
        }
    }

    /// Build the production state from process configuration.
    pub fn from_config(config: &ProxyConfig, stations: StationTable) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::new(config.upstream.clone())?;
        Ok(Self::new(
            client,
            Endpoint::subway(config.subway_key.clone()),
            Endpoint::intercity(config.intercity_key.clone()),
            stations,
        ))
    }
}
