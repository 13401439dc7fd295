//! Business logic behind the feature flag routes.

use tracing::info;

use crate::{
    dto::flags::{FlagToggle, FlagsResponse, MessageResponse},
    error::ServiceError,
    state::{SharedState, gag::GagKind},
};

/// Read the whole settings row.
pub async fn all_flags(state: &SharedState) -> Result<FlagsResponse, ServiceError> {
    let flags = state.flag_store().load().await?;
    Ok(flags.into())
}

/// Persist a single gag flag.
pub async fn set_flag(
    state: &SharedState,
    gag: GagKind,
    value: bool,
) -> Result<MessageResponse, ServiceError> {
    state.flag_store().update(gag, value).await?;
    info!(gag = %gag, flag = gag.flag_key(), value, "feature flag updated");
    Ok(MessageResponse::update_success())
}

/// Apply a typed `PUT /api/isForme*` body.
pub async fn apply_toggle<T: FlagToggle>(
    state: &SharedState,
    body: T,
) -> Result<MessageResponse, ServiceError> {
    set_flag(state, T::GAG, body.value()).await
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use futures::{FutureExt, future::BoxFuture};

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            flag_store::{FlagStore, MemoryFlagStore},
            storage::{StorageError, StorageResult, StoreOperation},
        },
        dto::flags::HumorToggle,
        state::{AppState, flags::FeatureFlagSet},
    };

    struct BrokenStore;

    impl FlagStore for BrokenStore {
        fn load(&self) -> BoxFuture<'static, StorageResult<FeatureFlagSet>> {
            async { Err(StorageError::new(StoreOperation::Read, io::Error::other("down"))) }
                .boxed()
        }

        fn update(&self, _gag: GagKind, _value: bool) -> BoxFuture<'static, StorageResult<()>> {
            async { Err(StorageError::new(StoreOperation::Write, io::Error::other("down"))) }
                .boxed()
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            async { Err(StorageError::new(StoreOperation::Probe, io::Error::other("down"))) }
                .boxed()
        }
    }

    #[tokio::test]
    async fn toggle_round_trips_through_store() {
        let state = AppState::new(Arc::new(MemoryFlagStore::new()), AppConfig::default());

        let ack = apply_toggle(&state, HumorToggle { is_forme_humor: true })
            .await
            .unwrap();
        assert_eq!(ack.message, "update success");

        let flags = all_flags(&state).await.unwrap();
        assert!(flags.is_forme_humor);
        assert!(!flags.is_forme_boldness);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailable() {
        let state = AppState::new(Arc::new(BrokenStore), AppConfig::default());

        assert!(matches!(
            all_flags(&state).await,
            Err(ServiceError::Unavailable(_))
        ));
        assert!(matches!(
            set_flag(&state, GagKind::Boldness, true).await,
            Err(ServiceError::Unavailable(_))
        ));
    }
}
