use airwatch_api::config::{MapSettings, load_registry};
use airwatch_api::{AppState, create_app};
use airwatch_provider::{DEFAULT_WAQI_URL, DataProvider, ProviderConfig};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the airwatch server
#[derive(Parser, Debug)]
#[command(name = "airwatch")]
#[command(about = "Air quality dashboard backend")]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, env = "AIRWATCH_PORT", default_value = "5000")]
    port: u16,

    /// WAQI API token; without one readings are simulated
    #[arg(long, env = "AQI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Latitude the map is centered on
    #[arg(long, env = "AIRWATCH_CENTER_LAT", default_value = "-1.2833", allow_negative_numbers = true)]
    center_lat: f64,

    /// Longitude the map is centered on
    #[arg(long, env = "AIRWATCH_CENTER_LON", default_value = "36.8167", allow_negative_numbers = true)]
    center_lon: f64,

    /// Initial zoom level of the map
    #[arg(long, env = "AIRWATCH_ZOOM", default_value = "12")]
    zoom: u8,

    /// Path to a JSON file listing the stations
    #[arg(short, long)]
    stations: Option<PathBuf>,

    /// Base URL of the WAQI API
    #[arg(long, default_value = DEFAULT_WAQI_URL)]
    upstream_url: String,

    /// Timeout of each upstream request, in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Simulated latency of mock readings, in milliseconds
    #[arg(long, default_value = "500")]
    mock_latency_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = load_registry(args.stations.as_deref()).await?;

    let provider = DataProvider::new(
        ProviderConfig {
            api_key: args.api_key,
            upstream_url: args.upstream_url,
            timeout: Duration::from_secs(args.timeout_secs),
            mock_latency: Duration::from_millis(args.mock_latency_ms),
        },
        registry,
    )
    .context("Failed to build the upstream client")?;

    let using_real_data = provider.uses_real_data();
    if using_real_data {
        tracing::info!("Serving live readings for {} stations", provider.registry().len());
    } else {
        tracing::info!("No API key found, serving simulated readings");
    }

    let map = MapSettings {
        center_lat: args.center_lat,
        center_lon: args.center_lon,
        zoom: args.zoom,
    };

    // Build our application with routes
    let app = create_app(AppState::new(Arc::new(provider), map, using_real_data));

    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
