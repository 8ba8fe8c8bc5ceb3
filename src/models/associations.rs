//! Association records linking GLPI entities to tickets and documents.
//!
//! These are the only response shapes the client understands beyond the
//! session token: `Document_Item` rows tying documents to an item, and
//! `Ticket_User` rows tying users to a ticket with a role code.

use serde::Deserialize;

/// Role code marking a ticket-user association as the requester.
///
/// GLPI's actor-type enumeration: 1 = requester, 2 = assigned, 3 = watcher.
pub const REQUESTER_ROLE: u8 = 1;

/// One `Document_Item` association row.
///
/// Unknown fields (entity ids, dates, positions) are ignored; only the
/// document id matters to callers.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentItem {
    /// Id of the associated document.
    pub documents_id: u64,
}

/// One `Ticket_User` association row.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketUser {
    /// Id of the associated user.
    pub users_id: u64,
    /// Actor role of the user on the ticket (see [`REQUESTER_ROLE`]).
    #[serde(rename = "type")]
    pub role: u8,
}

/// Projects the document ids out of a list of document associations,
/// preserving input order.
pub fn document_ids(associations: &[DocumentItem]) -> Vec<u64> {
    associations.iter().map(|item| item.documents_id).collect()
}

/// Finds the requester on a ticket from its user associations.
///
/// Returns the `users_id` of the last association carrying the requester
/// role, or `None` when the ticket has no requester. Last one wins when a
/// ticket somehow carries several.
pub fn requester_id(associations: &[TicketUser]) -> Option<u64> {
    associations
        .iter()
        .filter(|assoc| assoc.role == REQUESTER_ROLE)
        .next_back()
        .map(|assoc| assoc.users_id)
}
