//! Stopwatch Service - a background stopwatch with an HTTP control surface
//!
//! This is the main entry point for the stopwatch-service application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stopwatch_service::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::presenter_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stopwatch_service={},tower_http=info", config.log_level()))
        .init();

    info!("Starting stopwatch-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, precision={}",
          config.host, config.port, config.precision);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.precision));

    // Start the presentation adapter
    let presenter_state = Arc::clone(&state);
    tokio::spawn(async move {
        presenter_task(presenter_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start        - Start or resume the stopwatch");
    info!("  POST /stop         - Stop the stopwatch");
    info!("  POST /cancel       - Reset the stopwatch");
    info!("  POST /toggle       - Start/stop button");
    info!("  POST /command      - Apply a target state (Started, Stopped, Canceled)");
    info!("  PUT  /precision    - Select seconds or milliseconds display");
    info!("  GET  /status       - Current state and time components");
    info!("  GET  /display      - Rendered display");
    info!("  GET  /notification - Rendered notification");
    info!("  GET  /health       - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            signal?;
            info!("Shutdown signal received");
        }
    }

    state.shutdown()?;

    info!("Server shutdown complete");
    Ok(())
}
