use std::sync::Arc;

use futures::{FutureExt, future::BoxFuture};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    dao::{flag_store::FlagStore, storage::StorageResult},
    state::{flags::FeatureFlagSet, gag::GagKind},
};

/// In-process flag store. The row does not exist until it is first read or written.
#[derive(Clone, Default)]
pub struct MemoryFlagStore {
    row: Arc<RwLock<Option<FeatureFlagSet>>>,
}

impl MemoryFlagStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose row already exists with the given values.
    pub fn seeded(flags: FeatureFlagSet) -> Self {
        Self {
            row: Arc::new(RwLock::new(Some(flags))),
        }
    }
}

impl FlagStore for MemoryFlagStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<FeatureFlagSet>> {
        let row = self.row.clone();
        async move {
            if let Some(flags) = *row.read().await {
                return Ok(flags);
            }

            let mut guard = row.write().await;
            let flags = *guard.get_or_insert_with(|| {
                debug!("creating default feature flag row");
                FeatureFlagSet::default()
            });
            Ok(flags)
        }
        .boxed()
    }

    fn update(&self, gag: GagKind, value: bool) -> BoxFuture<'static, StorageResult<()>> {
        let row = self.row.clone();
        async move {
            let mut guard = row.write().await;
            guard.get_or_insert_with(FeatureFlagSet::default).set(gag, value);
            Ok(())
        }
        .boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        async { Ok(()) }.boxed()
    }
}
