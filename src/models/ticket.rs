//! Payloads the client builds for ticket and document operations.

use serde::Serialize;

/// Link code sent when relating two tickets.
///
/// GLPI's link-type enumeration; `3` marks the child as a duplicate of the
/// parent. The server rejects other semantics on this endpoint, so the code
/// is fixed rather than caller-supplied.
pub const TICKET_LINK_CODE: u8 = 3;

/// Body of a `Ticket_Ticket` relationship, child first.
#[derive(Debug, Clone, Serialize)]
pub struct TicketLink {
    /// The child ticket.
    pub tickets_id_1: u64,
    /// The parent ticket.
    pub tickets_id_2: u64,
    /// Relationship code (always [`TICKET_LINK_CODE`]).
    pub link: u8,
}

impl TicketLink {
    /// Builds the relationship payload for a parent/child ticket pair.
    pub fn new(parent_id: u64, child_id: u64) -> Self {
        TicketLink {
            tickets_id_1: child_id,
            tickets_id_2: parent_id,
            link: TICKET_LINK_CODE,
        }
    }
}

/// The `uploadManifest` part of a document upload.
///
/// Serializes to `{"name": ..., "_filename": [...]}`; the client wraps it
/// in the usual write envelope before sending. `_filename` entries must
/// match the field names of the file parts in the same multipart body.
#[derive(Debug, Clone, Serialize)]
pub struct UploadManifest {
    /// Display name of the document in GLPI.
    pub name: String,
    /// File names referenced by the multipart file parts.
    #[serde(rename = "_filename")]
    pub filenames: Vec<String>,
}

impl UploadManifest {
    /// Builds a manifest for a single file.
    pub fn single(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        UploadManifest {
            name: name.into(),
            filenames: vec![file_path.into()],
        }
    }
}
