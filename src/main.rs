use candlescope::analysis::GeminiClient;
use candlescope::api::{self, AppState};
use candlescope::config::Config;
use candlescope::market::KuCoinClient;
use candlescope::pipeline::{AnalysisPipeline, ArtifactStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candlescope=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!(
        "Starting candlescope for {} on {}:{}",
        config.symbol, config.host, config.port
    );

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set; analysis requests will fail");
    }

    // Outbound clients are shared across concurrent requests
    let market = KuCoinClient::new(&config);
    let analysis = GeminiClient::new(&config);
    let artifacts = ArtifactStore::new(config.max_stored_charts);

    let pipeline = Arc::new(AnalysisPipeline::new(
        &config,
        market,
        analysis,
        artifacts.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        pipeline,
        artifacts,
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("candlescope listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
