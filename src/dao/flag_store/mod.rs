mod memory;

pub use self::memory::MemoryFlagStore;

use futures::future::BoxFuture;

use crate::{
    dao::storage::StorageResult,
    state::{flags::FeatureFlagSet, gag::GagKind},
};

/// Abstraction over the persistence layer holding the single feature flag row.
pub trait FlagStore: Send + Sync {
    /// Read the row, creating it with every flag disabled on first access.
    fn load(&self) -> BoxFuture<'static, StorageResult<FeatureFlagSet>>;
    /// Overwrite a single flag, leaving the other four untouched.
    fn update(&self, gag: GagKind, value: bool) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
