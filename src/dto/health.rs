use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::storage::StorageResult;

/// Whether the flag store answered its probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The settings row can be served.
    Ok,
    /// The store failed its probe; flag reads will likely return 503.
    Degraded,
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
}

impl HealthResponse {
    /// Health derived from a store probe.
    pub fn from_probe(probe: &StorageResult<()>) -> Self {
        let status = match probe {
            Ok(()) => HealthStatus::Ok,
            Err(_) => HealthStatus::Degraded,
        };
        Self { status }
    }
}
