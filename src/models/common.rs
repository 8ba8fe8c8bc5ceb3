//! Common types shared across GLPI API models.
//!
//! This module defines the session response record and the write envelope
//! every GLPI write operation wraps its payload in.

use serde::{Deserialize, Serialize};

/// Response body of a successful `initSession` call.
///
/// The token is opaque; it is echoed back in the `Session-Token` header of
/// every subsequent request until `killSession` invalidates it.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionToken {
    /// The session token issued by the server.
    pub session_token: String,
}

/// The `{"input": ...}` envelope GLPI expects around write payloads.
///
/// Create, update and delete operations all post their data under a single
/// `input` key; the payload itself stays schemaless.
#[derive(Debug, Clone, Serialize)]
pub struct WriteEnvelope<T> {
    /// The wrapped payload.
    pub input: T,
}

impl<T> WriteEnvelope<T> {
    /// Wraps a payload in the `input` envelope.
    pub fn new(input: T) -> Self {
        WriteEnvelope { input }
    }
}
