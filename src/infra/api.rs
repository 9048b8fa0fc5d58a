//! HTTP implementation of the collection client.
//!
//! Thin on purpose: build the URL, send, normalize the outcome. Non-2xx
//! responses prefer the server's `{message}` body over a generic status
//! line; a 2xx body missing the `data` array is a shape error, never a
//! partially applied update. No retries anywhere.

use async_trait::async_trait;
use foglio_api_types::{ApiErrorBody, BlogPage, BlogRecord, SaveBlogRequest};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;

use crate::application::collection::{CollectionClient, CollectionError};
use crate::config::ApiSettings;

/// Collection client speaking to the `/blogs` REST endpoints.
#[derive(Clone, Debug)]
pub struct HttpCollection {
    client: Client,
    base: Url,
}

impl HttpCollection {
    /// Build a client from settings; a missing base URL is the configuration
    /// error, surfaced here rather than silently defaulted.
    pub fn from_settings(api: &ApiSettings) -> Result<Self, CollectionError> {
        let base = api
            .base_url
            .as_deref()
            .ok_or_else(CollectionError::missing_base_url)?;
        Self::new(base)
    }

    pub fn new(base: &str) -> Result<Self, CollectionError> {
        // Normalize to a trailing slash so join() appends instead of
        // replacing the last path segment.
        let mut raw = base.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|err| CollectionError::Config(format!("invalid API base URL: {err}")))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| {
                CollectionError::Config(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("foglio/", env!("CARGO_PKG_VERSION"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, CollectionError> {
        self.base
            .join(path)
            .map_err(|err| CollectionError::Config(format!("invalid API path: {err}")))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&SaveBlogRequest>,
    ) -> Result<Response, CollectionError> {
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.map_err(transport_error)
    }

    /// Reject non-2xx responses, preferring the server-provided message.
    async fn check(response: Response) -> Result<Response, CollectionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(CollectionError::transport(Some(status.as_u16()), message))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CollectionError> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|err| CollectionError::shape(format!("failed to parse body: {err}")))
    }
}

fn transport_error(err: reqwest::Error) -> CollectionError {
    CollectionError::transport(
        err.status().map(|status| status.as_u16()),
        format!("http error: {err}"),
    )
}

#[async_trait]
impl CollectionClient for HttpCollection {
    async fn list(&self, page: u32, search: &str) -> Result<BlogPage, CollectionError> {
        let mut url = self.endpoint("blogs")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if !search.is_empty() {
                pairs.append_pair("search", search);
            }
        }

        tracing::debug!(%url, "listing collection page");
        let response = Self::check(self.send(Method::GET, url, None).await?).await?;

        // Validate the envelope before committing to the typed shape, so the
        // shape error names what is actually missing.
        let value: serde_json::Value = Self::parse(response).await?;
        if !value.get("data").is_some_and(serde_json::Value::is_array) {
            return Err(CollectionError::shape(
                "response did not contain a `data` array of posts",
            ));
        }
        serde_json::from_value(value)
            .map_err(|err| CollectionError::shape(format!("failed to parse page envelope: {err}")))
    }

    async fn create(&self, draft: &SaveBlogRequest) -> Result<BlogRecord, CollectionError> {
        let url = self.endpoint("blogs")?;
        tracing::debug!(%url, "creating record");
        let response = Self::check(self.send(Method::POST, url, Some(draft)).await?).await?;
        Self::parse(response).await
    }

    async fn update(
        &self,
        id: i64,
        draft: &SaveBlogRequest,
    ) -> Result<BlogRecord, CollectionError> {
        let url = self.endpoint(&format!("blogs/{id}"))?;
        tracing::debug!(%url, "updating record");
        let response = Self::check(self.send(Method::PUT, url, Some(draft)).await?).await?;
        Self::parse(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), CollectionError> {
        let url = self.endpoint(&format!("blogs/{id}"))?;
        tracing::debug!(%url, "deleting record");
        Self::check(self.send(Method::DELETE, url, None).await?).await?;
        Ok(())
    }
}
