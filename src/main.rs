//! Clubhouse Back binary entrypoint wiring the REST layer to MongoDB or the in-memory store.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubhouse_back::{
    config::AppConfig,
    dao::clubhouse_store::MemoryClubhouseStore,
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config);

    install_storage(&app_state).await?;
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Supervise MongoDB when `MONGO_URI` is set, otherwise serve from process memory.
#[cfg(feature = "mongo-store")]
async fn install_storage(state: &SharedState) -> anyhow::Result<()> {
    use clubhouse_back::{
        dao::clubhouse_store::{
            ClubhouseStore,
            mongodb::{MongoClubhouseStore, MongoConfig},
        },
        dao::storage::StorageError,
        services::storage_supervisor,
    };

    if env::var_os("MONGO_URI").is_none() {
        return install_memory_store(state).await;
    }

    let mongo_config = MongoConfig::from_env()
        .await
        .context("reading MongoDB configuration")?;
    info!(database = %mongo_config.database_name, "using MongoDB storage");

    tokio::spawn(storage_supervisor::run(state.clone(), move || {
        let mongo_config = mongo_config.clone();
        async move {
            let store = MongoClubhouseStore::connect(mongo_config).await?;
            Ok::<_, StorageError>(Arc::new(store) as Arc<dyn ClubhouseStore>)
        }
    }));
    Ok(())
}

#[cfg(not(feature = "mongo-store"))]
async fn install_storage(state: &SharedState) -> anyhow::Result<()> {
    if env::var_os("MONGO_URI").is_some() {
        warn!("MONGO_URI is set but MongoDB support is not compiled in");
    }
    install_memory_store(state).await
}

async fn install_memory_store(state: &SharedState) -> anyhow::Result<()> {
    warn!("no MONGO_URI configured; data is kept in memory and lost on restart");
    state.set_store(Arc::new(MemoryClubhouseStore::new())).await;
    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
