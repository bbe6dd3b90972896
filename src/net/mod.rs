//! Network layer: wire types, the HTTP API client and the event stream.

pub mod api;
pub mod events;
pub mod types;
