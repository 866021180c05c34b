//! HTTP source for the analytics backend

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::fetch::AnalyticsSource;
use crate::request::FetchRequest;
use alumni_core::config::ApiConfig;
use alumni_core::{EntityKind, EntityListItem, ResultPage};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Analytics backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpAnalyticsSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpAnalyticsSource {
    /// Create a source for `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no http(s) scheme or the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AnalyticsResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AnalyticsError::invalid_endpoint(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: None,
            timeout,
        })
    }

    /// Create a source from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`HttpAnalyticsSource::new`].
    pub fn from_config(api: &ApiConfig) -> AnalyticsResult<Self> {
        let source = Self::new(api.base_url.clone(), Duration::from_secs(api.request_timeout))?;
        Ok(match &api.api_key {
            Some(key) => source.with_api_key(key.clone()),
            None => source,
        })
    }

    /// Set the API key for authentication
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Full URL for a request
    #[must_use]
    pub fn url_for(&self, kind: EntityKind, request: &FetchRequest) -> String {
        format!("{}/{}?{}", self.base_url, kind.path(), request.query_string())
    }
}

#[async_trait]
impl AnalyticsSource for HttpAnalyticsSource {
    async fn fetch_page(
        &self,
        kind: EntityKind,
        request: &FetchRequest,
    ) -> AnalyticsResult<ResultPage<EntityListItem>> {
        let url = self.url_for(kind, request);
        debug!(%url, "Fetching analytics page");

        let mut builder = self.client.get(&url);
        if let Some(ref api_key) = self.api_key {
            builder = builder.header("X-API-Key", api_key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AnalyticsError::Timeout(self.timeout)
            } else {
                AnalyticsError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), path = kind.path(), "Analytics backend error");
            return Err(AnalyticsError::status(status.as_u16(), kind.path()));
        }

        let body = response.bytes().await?;
        let page: ResultPage<EntityListItem> =
            serde_json::from_slice(&body).map_err(|source| AnalyticsError::Decode {
                path: kind.path().to_string(),
                source,
            })?;

        debug!(
            items = page.items.len(),
            count = page.count,
            filtered_count = page.filtered_count,
            "Fetched analytics page"
        );
        Ok(page.normalized(request.limit))
    }

    fn name(&self) -> &str {
        "http"
    }
}
