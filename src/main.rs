use offer_analytics::{
    config::Config,
    database::pool::create_pool,
    router,
    services::offer_store::MySqlOfferStore,
    AppState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("offer_analytics=info,tower_http=info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = Config::from_env()?;

    info!(
        host = %config.db_host,
        port = config.db_port,
        database = %config.db_name,
        "Connecting to record store"
    );
    let pool = create_pool(&config).await?;
    let store = Arc::new(MySqlOfferStore::new(pool));

    let app_state = AppState::new(store.clone(), &config);
    info!(
        positions_ttl_secs = config.positions_cache_ttl.as_secs(),
        offers_ttl_secs = config.offers_cache_ttl.as_secs(),
        "Read-through caches ready"
    );

    let app = router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Closing record store connections");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
