use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/health` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Storage backend serving requests ("memory", "mongodb" or "none").
    pub storage: String,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(storage: &str) -> Self {
        Self {
            status: "ok".to_string(),
            storage: storage.to_string(),
        }
    }

    /// Create a health response indicating the system is in degraded mode.
    pub fn degraded(storage: &str) -> Self {
        Self {
            status: "degraded".to_string(),
            storage: storage.to_string(),
        }
    }
}
