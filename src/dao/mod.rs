//! Persistence of the feature flag row.

/// Feature flag row storage.
pub mod flag_store;
/// Storage error types shared by every backend.
pub mod storage;
