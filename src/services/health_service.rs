use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the flag store and report ok or degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let probe = state.flag_store().health_check().await;
    if let Err(err) = &probe {
        warn!(error = %err, operation = %err.operation, "flag store probe failed");
    }
    HealthResponse::from_probe(&probe)
}
