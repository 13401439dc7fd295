//! HTTP routing of the flag API.

use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod flags;
pub mod health;

/// Compose the flag API, health check and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .nest("/api", flags::router())
        .merge(docs::router())
        .with_state(state)
}
