//! Admin panel listing the gags with one toggle each.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{error, info};

use crate::{
    client::{error::PageError, gateway::FlagGateway},
    state::{flags::FeatureFlagSet, gag::GagKind},
};

/// Result of a toggle as seen by the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// The server accepted the new value.
    Applied {
        /// Toggled gag.
        gag: GagKind,
        /// Value now shown.
        value: bool,
    },
    /// The update failed and the previous value is shown again.
    RolledBack {
        /// Toggled gag.
        gag: GagKind,
        /// Restored value.
        value: bool,
    },
}

/// Displayed flags plus the gateway persisting them.
///
/// Clones share the displayed state, so toggles of different gags can run
/// concurrently and each only ever rolls back its own flag.
pub struct AdminPanel<G> {
    gateway: Arc<G>,
    displayed: Arc<Mutex<FeatureFlagSet>>,
}

impl<G> Clone for AdminPanel<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            displayed: Arc::clone(&self.displayed),
        }
    }
}

impl<G: FlagGateway> AdminPanel<G> {
    /// Fetch the flags once; the panel cannot render without them.
    pub async fn load(gateway: G) -> Result<Self, PageError> {
        let flags = gateway
            .fetch_all()
            .await
            .map_err(PageError::FlagsUnavailable)?;

        Ok(Self {
            gateway: Arc::new(gateway),
            displayed: Arc::new(Mutex::new(flags)),
        })
    }

    /// Flags as currently displayed.
    pub fn flags(&self) -> FeatureFlagSet {
        *self.lock()
    }

    /// Flip a gag optimistically and persist it, restoring the old value on failure.
    pub async fn toggle(&self, gag: GagKind) -> ToggleOutcome {
        let previous = {
            let mut displayed = self.lock();
            let previous = displayed.get(gag);
            displayed.set(gag, !previous);
            previous
        };
        let value = !previous;

        match self.gateway.set_flag(gag, value).await {
            Ok(()) => {
                info!(gag = ?gag, value, "flag toggled");
                ToggleOutcome::Applied { gag, value }
            }
            Err(err) => {
                error!(gag = ?gag, value, error = %err, "flag update failed; restoring previous value");
                self.lock().set(gag, previous);
                ToggleOutcome::RolledBack {
                    gag,
                    value: previous,
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeatureFlagSet> {
        self.displayed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use futures::future::BoxFuture;
    use reqwest::StatusCode;

    use super::*;
    use crate::client::error::{GatewayError, GatewayResult};

    /// In-memory gateway failing on demand.
    #[derive(Default)]
    pub(crate) struct FakeGateway {
        pub(crate) flags: Mutex<FeatureFlagSet>,
        pub(crate) failing: HashSet<GagKind>,
        pub(crate) unreachable: bool,
    }

    fn refused(path: String) -> GatewayError {
        GatewayError::RequestStatus {
            path,
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    impl FlagGateway for FakeGateway {
        fn fetch_all(&self) -> BoxFuture<'static, GatewayResult<FeatureFlagSet>> {
            let result = if self.unreachable {
                Err(refused("api/allFlags".into()))
            } else {
                Ok(*self.flags.lock().unwrap())
            };
            Box::pin(async move { result })
        }

        fn set_flag(&self, gag: GagKind, value: bool) -> BoxFuture<'static, GatewayResult<()>> {
            let result = if self.failing.contains(&gag) {
                Err(refused(format!("api/{}", gag.flag_key())))
            } else {
                self.flags.lock().unwrap().set(gag, value);
                Ok(())
            };
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn failed_update_restores_previous_value() {
        let gateway = FakeGateway {
            flags: Mutex::new(FeatureFlagSet::default().with(GagKind::Humor, true)),
            failing: HashSet::from([GagKind::Humor]),
            ..Default::default()
        };
        let panel = AdminPanel::load(gateway).await.unwrap();

        let outcome = panel.toggle(GagKind::Humor).await;
        assert_eq!(
            outcome,
            ToggleOutcome::RolledBack {
                gag: GagKind::Humor,
                value: true
            }
        );
        assert!(panel.flags().get(GagKind::Humor));

        // The panel stays usable.
        let outcome = panel.toggle(GagKind::Boldness).await;
        assert_eq!(
            outcome,
            ToggleOutcome::Applied {
                gag: GagKind::Boldness,
                value: true
            }
        );
        assert!(panel.gateway.flags.lock().unwrap().get(GagKind::Boldness));
    }

    #[tokio::test]
    async fn concurrent_toggles_only_roll_back_their_own_flag() {
        let gateway = FakeGateway {
            failing: HashSet::from([GagKind::Execution]),
            ..Default::default()
        };
        let panel = AdminPanel::load(gateway).await.unwrap();

        let (failed, applied) = tokio::join!(
            panel.toggle(GagKind::Execution),
            panel.toggle(GagKind::Creativity)
        );
        assert!(matches!(failed, ToggleOutcome::RolledBack { .. }));
        assert!(matches!(applied, ToggleOutcome::Applied { .. }));
        assert_eq!(
            panel.flags(),
            FeatureFlagSet::default().with(GagKind::Creativity, true)
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_fatal() {
        let gateway = FakeGateway {
            unreachable: true,
            ..Default::default()
        };
        let err = AdminPanel::load(gateway).await.err().unwrap();
        assert!(matches!(err, PageError::FlagsUnavailable(_)));
    }
}
