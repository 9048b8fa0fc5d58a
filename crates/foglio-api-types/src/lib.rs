//! Shared wire types for the blog collection REST API.
//!
//! These mirror the JSON shapes the server actually emits: a Laravel-style
//! paginated envelope for `GET /blogs`, a bare record for saves, and an
//! optional `{message}` error body. The engine crate never touches raw
//! `serde_json::Value`s outside of shape validation; everything crosses the
//! boundary through these types.

use serde::{Deserialize, Serialize};

/// A single record as stored by the server.
///
/// `content` may be `null` or missing entirely for legacy rows, so it is
/// optional on the wire even though the display model treats absence as an
/// empty body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// One page of the server-paginated collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPage {
    pub data: Vec<BlogRecord>,
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub links: Vec<PageLink>,
}

/// A pagination navigation link from the server envelope.
///
/// A `null` url marks a non-actionable edge link (first/last). Labels may
/// carry HTML entities (`&laquo; Previous`); they are matched semantically,
/// never rendered by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

/// Payload accepted by `POST /blogs` and `PUT /blogs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBlogRequest {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published_at: Option<String>,
}

/// Error body the server attaches to failed mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
