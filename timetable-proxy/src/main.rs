use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use timetable_proxy::config::{INTERCITY_KEY_VAR, ProxyConfig, SUBWAY_KEY_VAR};
use timetable_proxy::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "timetable_proxy=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ProxyConfig::from_env()?;

    // Missing keys only fail the endpoint that needs them
    for (var, key) in [
        (SUBWAY_KEY_VAR, &config.subway_key),
        (INTERCITY_KEY_VAR, &config.intercity_key),
    ] {
        if key.is_none() {
            warn!("{var} not set; requests to its endpoint will fail");
        }
    }

    let stations = config.station_table()?;
    info!(stations = stations.len(), "loaded station table");

    let state = AppState::from_config(&config, stations)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        timeout_secs = config.upstream.timeout.as_secs(),
        "Timetable proxy listening on http://{}", config.bind_addr
    );
    info!("  GET  /health              - Health check");
    info!("  GET  /api/subwayTimetable - Subway station timetable");
    info!("  GET  /api/korailTimetable - Intercity journey timetable");

    axum::serve(listener, app).await?;
    Ok(())
}
