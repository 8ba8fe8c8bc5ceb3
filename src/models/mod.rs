//! Data models for the GLPI REST API.
//!
//! GLPI items themselves are schemaless from this client's point of view
//! and travel as `serde_json::Value`. The types here cover the payloads the
//! client constructs itself (write envelopes, ticket links, upload
//! manifests) and the association records it knows how to pick apart.

mod associations;
mod common;
mod ticket;

pub use associations::*;
pub use common::*;
pub use ticket::*;
