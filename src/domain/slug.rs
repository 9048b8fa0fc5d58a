//! Deterministic slug derivation for blank-slug submissions.
//!
//! A derived slug is lowercase, trimmed, with whitespace runs collapsed to
//! single hyphens and everything outside word characters and hyphens
//! stripped. Derivation is idempotent: feeding a slug back through produces
//! the same slug. Uniqueness is the server's concern, not ours; a colliding
//! slug comes back as a save error.

use slug::slugify;
use thiserror::Error;

/// Errors that can occur while deriving a slug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from the provided human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}
