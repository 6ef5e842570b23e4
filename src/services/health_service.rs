use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report the health status, pinging the storage backend when one is installed.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Some(store) = state.store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded("none");
    };

    let backend = store.backend_name();
    if let Err(err) = store.health_check().await {
        warn!(backend, error = %err, "storage health check failed");
        return HealthResponse::degraded(backend);
    }

    if state.is_degraded() {
        HealthResponse::degraded(backend)
    } else {
        HealthResponse::ok(backend)
    }
}
