//! The create/edit form lifecycle.
//!
//! A [`Draft`] is never authoritative: it is seeded from a post on edit
//! start, validated and shaped into a save payload on submit, and only
//! cleared once the session reports the save succeeded. A failed submit
//! keeps the draft so typed content is not lost.

use foglio_api_types::SaveBlogRequest;
use thiserror::Error;
use time::{
    OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::domain::posts::Post;
use crate::domain::slug::{self, SlugError};

/// The in-progress, unsaved form state. `published_at` holds the
/// datetime-local editable shape (`YYYY-MM-DDTHH:MM`), not the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub slug: String,
    pub published_at: String,
}

/// Whether a submit dispatches a create or an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Editing(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a title is required")]
    MissingTitle,
    #[error("content is required")]
    MissingContent,
    #[error(transparent)]
    Slug(#[from] SlugError),
}

/// Form state: an empty create draft, or a draft bound to an existing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    mode: FormMode,
    draft: Draft,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: Draft::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Snapshot `post` into the draft and switch to editing mode.
    pub fn start_edit(&mut self, post: &Post) {
        self.mode = FormMode::Editing(post.id);
        self.draft = Draft {
            title: post.title.clone(),
            content: post.content.clone(),
            slug: post.slug.clone().unwrap_or_default(),
            published_at: post
                .published_at
                .as_deref()
                .map(to_datetime_local)
                .unwrap_or_default(),
        };
    }

    /// Bind the draft to an existing record id without seeding it from a
    /// fetched post. Used by adapters that supply every field explicitly.
    pub fn bind(&mut self, id: i64) {
        self.mode = FormMode::Editing(id);
    }

    /// Discard the draft and return to create mode.
    pub fn cancel_edit(&mut self) {
        *self = Self::new();
    }

    /// Clear the draft after a confirmed successful save.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Validate the draft and shape it into the save payload.
    ///
    /// Title and content are required. A blank slug is derived from the
    /// title; a blank timestamp is sent as `null`. The draft itself is left
    /// untouched, so a later failure loses nothing.
    pub fn prepare_submit(&self) -> Result<SaveBlogRequest, FormError> {
        if self.draft.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.draft.content.trim().is_empty() {
            return Err(FormError::MissingContent);
        }

        let slug = if self.draft.slug.trim().is_empty() {
            slug::derive_slug(&self.draft.title)?
        } else {
            self.draft.slug.trim().to_string()
        };

        let published_at = self.draft.published_at.trim();
        let published_at = (!published_at.is_empty()).then(|| published_at.to_string());

        Ok(SaveBlogRequest {
            title: self.draft.title.clone(),
            content: self.draft.content.clone(),
            slug,
            published_at,
        })
    }
}

/// Convert a wire timestamp to the `YYYY-MM-DDTHH:MM` shape a
/// datetime-local field edits, normalized to UTC. An unparseable value is
/// passed through untouched rather than discarded.
fn to_datetime_local(raw: &str) -> String {
    let local = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    OffsetDateTime::parse(raw, &Rfc3339)
        .ok()
        .and_then(|parsed| parsed.to_offset(UtcOffset::UTC).format(&local).ok())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            id: 7,
            title: "Hello, World!  Again".to_string(),
            date: "January 5, 2024".to_string(),
            excerpt: "body".to_string(),
            content: "body".to_string(),
            slug: Some("hello-world-again".to_string()),
            published_at: Some("2024-01-05T12:30:00Z".to_string()),
        }
    }

    #[test]
    fn starts_in_create_mode_with_empty_draft() {
        let form = FormState::new();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.draft(), &Draft::default());
    }

    #[test]
    fn start_edit_seeds_draft_and_converts_timestamp() {
        let mut form = FormState::new();
        form.start_edit(&post());
        assert_eq!(form.mode(), FormMode::Editing(7));
        assert_eq!(form.draft().title, "Hello, World!  Again");
        assert_eq!(form.draft().slug, "hello-world-again");
        assert_eq!(form.draft().published_at, "2024-01-05T12:30");
    }

    #[test]
    fn start_edit_normalizes_offset_timestamps_to_utc() {
        let mut form = FormState::new();
        let mut seeded = post();
        seeded.published_at = Some("2024-01-05T12:30:00+02:00".to_string());
        form.start_edit(&seeded);
        assert_eq!(form.draft().published_at, "2024-01-05T10:30");
    }

    #[test]
    fn cancel_edit_returns_to_empty_create_mode() {
        let mut form = FormState::new();
        form.start_edit(&post());
        form.cancel_edit();
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.draft().title.is_empty());
    }

    #[test]
    fn submit_requires_title_and_content() {
        let mut form = FormState::new();
        assert_eq!(form.prepare_submit(), Err(FormError::MissingTitle));

        form.draft_mut().title = "A".to_string();
        assert_eq!(form.prepare_submit(), Err(FormError::MissingContent));
    }

    #[test]
    fn blank_slug_is_derived_from_title() {
        let mut form = FormState::new();
        form.draft_mut().title = "Hello, World!  Again".to_string();
        form.draft_mut().content = "body".to_string();
        let request = form.prepare_submit().expect("valid draft");
        assert_eq!(request.slug, "hello-world-again");
    }

    #[test]
    fn explicit_slug_is_kept() {
        let mut form = FormState::new();
        form.draft_mut().title = "Anything".to_string();
        form.draft_mut().content = "body".to_string();
        form.draft_mut().slug = "  custom-slug  ".to_string();
        let request = form.prepare_submit().expect("valid draft");
        assert_eq!(request.slug, "custom-slug");
    }

    #[test]
    fn blank_timestamp_submits_null() {
        let mut form = FormState::new();
        form.draft_mut().title = "A".to_string();
        form.draft_mut().content = "b".to_string();
        let request = form.prepare_submit().expect("valid draft");
        assert_eq!(request.published_at, None);
    }

    #[test]
    fn prepare_submit_leaves_draft_untouched() {
        let mut form = FormState::new();
        form.draft_mut().title = "A".to_string();
        form.draft_mut().content = "b".to_string();
        let before = form.draft().clone();
        let _ = form.prepare_submit().expect("valid draft");
        assert_eq!(form.draft(), &before);
    }
}
