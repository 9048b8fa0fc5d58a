//! The remote collection contract consumed by the application layer.
//!
//! The trait is implemented over HTTP in `infra::api`; tests substitute
//! in-memory fakes. Failures are normalized into the three-way taxonomy the
//! sessions surface to users: configuration, transport, and response shape.

use async_trait::async_trait;
use foglio_api_types::{BlogPage, BlogRecord, SaveBlogRequest};
use thiserror::Error;

/// Failure taxonomy for collection access.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The API base location is unset or unusable. Fatal to any action until
    /// fixed externally; never silently defaulted.
    #[error("configuration error: {0}")]
    Config(String),
    /// Network failure or non-2xx HTTP status. Recoverable; retried only by
    /// a new user-triggered action.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// The server answered 2xx with a body we cannot use. Fatal for this
    /// request only; existing local state stays untouched.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl CollectionError {
    pub fn missing_base_url() -> Self {
        Self::Config(
            "API base URL is not set; configure api.base_url or FOGLIO__API__BASE_URL".to_string(),
        )
    }

    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }
}

/// Client for one remote paginated collection.
///
/// `list` pages are positive integers; an empty search term means no filter.
/// Implementations never retry; failures surface to the caller.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    async fn list(&self, page: u32, search: &str) -> Result<BlogPage, CollectionError>;

    async fn create(&self, draft: &SaveBlogRequest) -> Result<BlogRecord, CollectionError>;

    async fn update(
        &self,
        id: i64,
        draft: &SaveBlogRequest,
    ) -> Result<BlogRecord, CollectionError>;

    async fn delete(&self, id: i64) -> Result<(), CollectionError>;
}
