//! Domain layer: display model, record transform, slug derivation.

pub mod posts;
pub mod slug;
