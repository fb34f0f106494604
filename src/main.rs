use scoreboard::{
    config::AppConfig,
    feed::{apply_seed, load_seed, InMemoryScoreFeed},
    leaderboard,
    shared::AppState,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting scoreboard server");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let feed = Arc::new(InMemoryScoreFeed::new());

    if let Some(seed_path) = &config.seed_path {
        match load_seed(seed_path).await {
            Ok(seed) => {
                let collections = apply_seed(&feed, seed).await;
                info!(path = %seed_path.display(), collections, "Loaded seed data");
            }
            Err(e) => {
                error!(path = %seed_path.display(), error = %e, "Failed to load seed data");
                std::process::exit(1);
            }
        }
    }

    let app_state = AppState::new(feed);

    let app = leaderboard::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind listener");
    info!(addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await.expect("server error");
}
