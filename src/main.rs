use std::net::SocketAddr;
use std::sync::Arc;

use station_watch::config::{AppConfig, LogConfig};
use station_watch::monitoring::{DiscordNotifier, Notifier, Tracker, VatsimFeed};
use station_watch::shutdown::shutdown_signal;
use station_watch::utils::logging::init_logging;
use station_watch::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. environment
    dotenvy::dotenv().ok();

    // 2. logging
    let _guard = init_logging(&LogConfig::from_env());

    // 3. configuration; the only fatal failure
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        e
    })?;

    // 4. collaborators and shared state
    let notifier = Arc::new(DiscordNotifier::from_config(config.discord.clone())?);
    let feed = Arc::new(VatsimFeed::new(config.feed_url.clone())?);
    let state = AppState::new(notifier.is_enabled());

    match notifier.connect().await {
        Ok(Some(username)) => state.log(format!("Discord bot connected as {}", username)),
        Ok(None) => state.log("Discord disabled, notifications will be skipped"),
        Err(e) => state.log(format!("ERROR connecting to Discord: {}", e)),
    }

    // 5. tracker task
    let tracker = Tracker::new(state.clone(), feed, notifier).with_interval(config.poll_interval);
    let tracker_handle = tokio::spawn(async move { tracker.run_loop().await });

    // 6. control surface
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracker_handle.abort();
    tracing::info!("Server stopped");
    Ok(())
}
