use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use map_server::geocode::{GeocodeClient, GeocodeConfig};
use map_server::stations::{CacheConfig, CachedStationsClient, StationsClient, StationsConfig};
use map_server::web::{AppState, MapConfig, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Stations upstream, env-overridable for local development
    let mut stations_config = StationsConfig::new();
    if let Ok(url) = std::env::var("STATIONS_UPSTREAM_URL") {
        stations_config = stations_config.with_upstream_url(url);
    }
    let stations =
        StationsClient::new(stations_config).expect("failed to create stations client");

    // Geocoding upstream
    let mut geocode_config = GeocodeConfig::new();
    if let Ok(url) = std::env::var("GEOCODE_UPSTREAM_URL") {
        geocode_config = geocode_config.with_upstream_url(url);
    }
    let geocode = GeocodeClient::new(geocode_config).expect("failed to create geocode client");

    // Cached path for the server-side marker pipeline
    let stations_cache = CachedStationsClient::new(stations.clone(), &CacheConfig::default());

    let state = AppState::new(stations, stations_cache, geocode, MapConfig::default());

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let app = create_router(state, &static_dir);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("station map listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
