use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use jewelstore_api::{
    app::{build_app, AppServices},
    config::{self, StoreConfig},
    middleware::SessionCookie,
};
use jewelstore_cart::{InMemorySessionStore, SessionStore};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jewelstore_observability::init(config::log_format_from_env());

    let config = StoreConfig::from_env();
    tracing::info!(?config, "starting storefront");

    let catalog = Arc::new(jewelstore_catalog::load(&config.catalog_path));
    if catalog.is_demo() {
        tracing::warn!(products = catalog.len(), "serving the demo catalog");
    } else {
        tracing::info!(products = catalog.len(), "catalog loaded");
    }

    let sessions = Arc::new(InMemorySessionStore::new(config.session_ttl));
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                ticker.tick().await;
                let purged = sessions.purge_expired();
                if purged > 0 {
                    tracing::debug!(purged, "expired sessions purged");
                }
            }
        });
    }

    let services = AppServices::new(catalog, sessions);
    let app = build_app(services, SessionCookie::new(config.production));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
