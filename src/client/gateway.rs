//! HTTP access to the feature flag API.

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    client::error::{GatewayError, GatewayResult},
    dto::flags::{FlagsResponse, MessageResponse, toggle_body},
    state::{flags::FeatureFlagSet, gag::GagKind},
};

const ALL_FLAGS_PATH: &str = "api/allFlags";

/// Read and write access to the feature flags.
pub trait FlagGateway: Send + Sync {
    /// Fetch the whole flag set.
    fn fetch_all(&self) -> BoxFuture<'static, GatewayResult<FeatureFlagSet>>;
    /// Persist a single flag.
    fn set_flag(&self, gag: GagKind, value: bool) -> BoxFuture<'static, GatewayResult<()>>;
}

/// [`FlagGateway`] speaking to the flag API over HTTP.
#[derive(Clone)]
pub struct HttpFlagGateway {
    client: Client,
    base_url: Arc<str>,
}

impl HttpFlagGateway {
    /// Gateway targeting the API served at `base_url`.
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| GatewayError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        self.client.request(method, url)
    }

    async fn send<T>(builder: reqwest::RequestBuilder, path: String) -> GatewayResult<T>
    where
        T: DeserializeOwned,
    {
        let response = builder
            .send()
            .await
            .map_err(|source| GatewayError::RequestSend {
                path: path.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|source| GatewayError::DecodeResponse { path, source }),
            status => Err(GatewayError::RequestStatus { path, status }),
        }
    }
}

impl FlagGateway for HttpFlagGateway {
    fn fetch_all(&self) -> BoxFuture<'static, GatewayResult<FeatureFlagSet>> {
        let builder = self.request(Method::GET, ALL_FLAGS_PATH);
        Box::pin(async move {
            let flags = Self::send::<FlagsResponse>(builder, ALL_FLAGS_PATH.to_string()).await?;
            Ok(flags.into())
        })
    }

    fn set_flag(&self, gag: GagKind, value: bool) -> BoxFuture<'static, GatewayResult<()>> {
        let path = format!("api/{}", gag.flag_key());
        let builder = self
            .request(Method::PUT, &path)
            .json(&toggle_body(gag, value));
        Box::pin(async move {
            let response = Self::send::<MessageResponse>(builder, path).await?;
            debug!(gag = ?gag, value, message = %response.message, "flag update acknowledged");
            Ok(())
        })
    }
}
