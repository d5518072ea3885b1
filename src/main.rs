//! Behavior Tracker server
//!
//! Serves the roster, the behavior log endpoint and the browser view.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use behavior_tracker::{
    api::create_router,
    config::Config,
    services::{LogAppender, RosterFetcher},
    sheets::{GoogleSheetsStore, SheetStore},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("behavior_tracker={},tower_http=info", config.log_level()))
        .init();

    info!("Starting behavior-tracker server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, roster={}, log={}",
        config.host, config.port, config.student_range, config.log_range
    );

    let store: Arc<dyn SheetStore> = Arc::new(GoogleSheetsStore::new(config.service_account()));
    let roster = RosterFetcher::new(Arc::clone(&store), config.roster_target());
    let log_appender = LogAppender::new(store, config.log_target());

    let state = Arc::new(AppState::new(roster, log_appender));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                  - Behavior tracker page");
    info!("  GET  /api/get-students  - Student roster");
    info!("  POST /api/log-behavior  - Append a behavior interval");
    info!("  GET  /health            - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
