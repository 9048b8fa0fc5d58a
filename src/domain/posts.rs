//! The post display model and the pure transform from wire records.
//!
//! [`Post::from_record`] is deterministic and side-effect free: the same raw
//! record always yields the same post, regardless of call order. Posts are
//! replaced wholesale on every fetch; nothing here merges or patches.

use foglio_api_types::BlogRecord;
use serde::Serialize;
use time::{
    OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::Rfc3339,
    macros::format_description,
};

/// Excerpts keep this many characters of content before truncating.
const EXCERPT_CHARS: usize = 150;

/// Placeholder shown when a record carries no usable publication date.
const NO_DATE: &str = "N/A";

/// A single content item as displayed in the UI.
///
/// `date` and `excerpt` are derived, never authoritative; `published_at`
/// keeps the raw server timestamp so edit sessions can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    pub slug: Option<String>,
    pub published_at: Option<String>,
}

impl Post {
    /// Build the display model from a raw API record.
    pub fn from_record(record: BlogRecord) -> Self {
        let content = record.content.unwrap_or_default();
        let date = record
            .published_at
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(display_date)
            .unwrap_or_else(|| NO_DATE.to_string());

        Self {
            id: record.id,
            title: record.title,
            date,
            excerpt: excerpt_of(&content),
            content,
            slug: record.slug,
            published_at: record.published_at,
        }
    }
}

/// Format a server timestamp as a long date, e.g. `January 5, 2024`.
///
/// Returns `None` when the timestamp cannot be parsed; the caller falls back
/// to the placeholder rather than poisoning an otherwise valid record.
fn display_date(raw: &str) -> Option<String> {
    let long = format_description!("[month repr:long] [day padding:none], [year]");

    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return parsed.date().format(&long).ok();
    }

    // Servers that skip RFC 3339 tend to emit either the SQL shape or the
    // datetime-local shape an edit form produced.
    let sql = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let local = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    for format in [sql, local] {
        if let Ok(parsed) = PrimitiveDateTime::parse(raw, &format) {
            return parsed.date().format(&long).ok();
        }
    }

    None
}

/// First [`EXCERPT_CHARS`] characters of content, with an ellipsis only when
/// something was actually cut. Counts `char`s, so multi-byte content never
/// splits mid-sequence.
fn excerpt_of(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
