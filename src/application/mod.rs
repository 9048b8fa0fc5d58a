//! Application layer: the list-sync state machine, the form lifecycle, and
//! the session drivers that connect them to a collection client.

pub mod collection;
pub mod form;
pub mod list_sync;
pub mod session;
