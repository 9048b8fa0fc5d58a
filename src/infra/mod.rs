//! Infrastructure: the HTTP collection client and telemetry installation.

pub mod api;
pub mod error;
pub mod telemetry;
