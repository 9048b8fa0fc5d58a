//! foglio: a client-side synchronization engine for a server-paginated blog
//! collection.
//!
//! The crate keeps a local view of a remote REST collection consistent across
//! fetches, edits, deletions, and page transitions. The layers:
//!
//! - [`domain`]: the display model, the pure record transform, and slug
//!   derivation.
//! - [`application`]: the list-sync state machine, the form/edit lifecycle,
//!   and the session drivers that execute exactly one planned fetch per
//!   trigger.
//! - [`infra`]: the HTTP implementation of the collection client and
//!   telemetry installation.
//! - [`config`]: layered typed settings (file, environment, CLI overrides).
//!
//! Presentation is deliberately out of scope; `foglio-cli` is the one thin
//! adapter shipped here, and anything else renders the state these layers
//! produce.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
