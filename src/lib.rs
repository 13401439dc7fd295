//! Library crate for goodgle-forme: the feature-flag API, its client, and the
//! interaction engine of the judging form.

pub mod client;
pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod forme;
pub mod routes;
pub mod services;
pub mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Configure tracing subscribers for the binaries; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
