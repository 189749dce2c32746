//! In-process publish/subscribe for the chat relay.
//!
//! - [`ChatHub`]: topic-keyed fan-out backed by `tokio::sync::broadcast`.

pub mod hub;

pub use hub::ChatHub;
