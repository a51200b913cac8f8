use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use stay_pricer::ai::GeminiClient;
use stay_pricer::bot::Dispatcher;
use stay_pricer::chat::TelegramClient;
use stay_pricer::config::Config;
use stay_pricer::scrapers::SubprocessScraper;
use stay_pricer::store::MongoStore;
use stay_pricer::webhook::{self, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stay_pricer=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("🏠 Stay Pricer - rental price assistant");

    let config = Config::from_env()?;
    let store = MongoStore::connect(&config.mongo_uri, &config.mongo_database, config.store_timeout).await?;

    let scraper = SubprocessScraper::new(&config.python_path, &config.scraper_path)
        .with_timeout(config.scraper_timeout);
    let advisor = GeminiClient::new(&config.gemini_key, &config.gemini_model, config.ai_timeout)?;
    let chat = TelegramClient::new(&config.telegram_token)?;

    let dispatcher = Dispatcher::new(
        Arc::new(store.clone()),
        Arc::new(scraper),
        Arc::new(advisor),
        Arc::new(chat),
    );
    let app = webhook::router(AppState::new(dispatcher));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Starting server on {}...", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.shutdown().await;
    info!("👋 Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
