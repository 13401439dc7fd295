//! Request and response bodies of the flag API.

/// Wire types of the flag routes.
pub mod flags;
/// Health check payload.
pub mod health;
