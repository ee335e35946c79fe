use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use web_localizer::config::Config;
use web_localizer::i18n::{InstalledLocales, JsonCatalog};
use web_localizer::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("web_localizer=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        "Serving languages {} (default {}) under '{}'",
        config.languages.join(","),
        config.default_language,
        config.base_path
    );

    let catalog = JsonCatalog::load_dir(&config.lang_dir)
        .with_context(|| format!("Failed to load translations from {}", config.lang_dir))?;
    let locales = InstalledLocales::from_system();

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        locales: Arc::new(locales),
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::router(state))
        .await
        .context("Server error")?;

    Ok(())
}
