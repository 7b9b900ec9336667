use std::sync::Arc;

use anyhow::Context;

use empowrhr_api::{ApiConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the real environment still applies.
    let _ = dotenv::dotenv();
    empowrhr_observability::init();

    let config = ApiConfig::from_env()?;

    // Unreachable store at startup terminates the process; no retry.
    let services = match app::services::build_services(&config).await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "startup failed");
            std::process::exit(1);
        }
    };

    let router = app::build_app(services, &config)?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
