//! Business logic behind the routes.

/// OpenAPI documentation generation.
pub mod documentation;
/// Feature flag reads and writes.
pub mod flag_service;
/// Health check service.
pub mod health_service;
