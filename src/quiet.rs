//! Logging-only facade over [`GlpiClient`].
//!
//! Call sites that treat failures as "the item just isn't there" can use
//! `QuietClient`: every operation returns an `Option`, errors are logged
//! at `debug` level and discarded. With debug mode off (the default
//! filter in [`crate::logging`]), swallowed errors are invisible.
//!
//! The typed [`GlpiClient`] API remains available through
//! [`inner`](QuietClient::inner) for callers that need to distinguish
//! error kinds.

use std::path::Path;

use serde_json::Value;

use crate::client::GlpiClient;
use crate::error::GlpiError;

/// Facade over [`GlpiClient`] that logs and discards errors.
#[derive(Clone)]
pub struct QuietClient {
    inner: GlpiClient,
}

impl QuietClient {
    /// Wraps a client in the logging-only facade.
    pub fn new(inner: GlpiClient) -> Self {
        QuietClient { inner }
    }

    /// The wrapped typed client.
    pub fn inner(&self) -> &GlpiClient {
        &self.inner
    }

    /// Logs a swallowed error and maps the result to an `Option`.
    fn swallow<T>(operation: &str, result: Result<T, GlpiError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(operation, error = %e, "GLPI operation failed");
                None
            }
        }
    }

    /// Establishes a session; failures are logged and leave the session
    /// unset.
    pub async fn init_session(&self) {
        let _ = Self::swallow("init_session", self.inner.init_session().await);
    }

    /// Invalidates the session, returning the decoded response body.
    pub async fn kill_session(&self) -> Option<Value> {
        Self::swallow("kill_session", self.inner.kill_session().await)
    }

    /// Fetches a single item. See [`GlpiClient::get_item`].
    pub async fn get_item(
        &self,
        item_type: &str,
        item_id: u64,
        filter: Option<&str>,
    ) -> Option<Value> {
        Self::swallow("get_item", self.inner.get_item(item_type, item_id, filter).await)
    }

    /// Fetches the solutions recorded on a ticket.
    pub async fn get_ticket_solution(&self, ticket_id: u64) -> Option<Value> {
        Self::swallow(
            "get_ticket_solution",
            self.inner.get_ticket_solution(ticket_id).await,
        )
    }

    /// Searches items of a type.
    pub async fn search_items(&self, item_type: &str, filter: &str) -> Option<Value> {
        Self::swallow("search_items", self.inner.search_items(item_type, filter).await)
    }

    /// Creates an item.
    pub async fn add_item(&self, item_type: &str, data: Value) -> Option<Value> {
        Self::swallow("add_item", self.inner.add_item(item_type, data).await)
    }

    /// Updates an item.
    pub async fn update_item(&self, item_type: &str, item_id: u64, params: Value) -> Option<Value> {
        Self::swallow(
            "update_item",
            self.inner.update_item(item_type, item_id, params).await,
        )
    }

    /// Deletes items of a type.
    pub async fn delete_item(&self, item_type: &str, params: Value) -> Option<Value> {
        Self::swallow("delete_item", self.inner.delete_item(item_type, params).await)
    }

    /// Assigns a group to a ticket.
    pub async fn assign_group_to_ticket(&self, params: Value) -> Option<Value> {
        Self::swallow(
            "assign_group_to_ticket",
            self.inner.assign_group_to_ticket(params).await,
        )
    }

    /// Assigns a requester to a ticket.
    pub async fn assign_requester_to_ticket(&self, params: Value) -> Option<Value> {
        Self::swallow(
            "assign_requester_to_ticket",
            self.inner.assign_requester_to_ticket(params).await,
        )
    }

    /// Adds a follow-up to a ticket.
    pub async fn assign_followup_to_ticket(&self, params: Value) -> Option<Value> {
        Self::swallow(
            "assign_followup_to_ticket",
            self.inner.assign_followup_to_ticket(params).await,
        )
    }

    /// Records a solution on a ticket.
    pub async fn assign_solution_to_ticket(&self, params: Value) -> Option<Value> {
        Self::swallow(
            "assign_solution_to_ticket",
            self.inner.assign_solution_to_ticket(params).await,
        )
    }

    /// Links two tickets.
    pub async fn link_tickets(&self, parent_id: u64, child_id: u64) -> Option<Value> {
        Self::swallow("link_tickets", self.inner.link_tickets(parent_id, child_id).await)
    }

    /// Uploads a local file as a GLPI document.
    pub async fn upload_document(&self, file_path: &Path, name: &str) -> Option<Value> {
        Self::swallow(
            "upload_document",
            self.inner.upload_document(file_path, name).await,
        )
    }

    /// Downloads a document, returning the filename it was saved under.
    pub async fn download_document(&self, item_type: &str, item_id: u64) -> Option<String> {
        Self::swallow(
            "download_document",
            self.inner.download_document(item_type, item_id).await,
        )
    }

    /// Associates a document with an item.
    pub async fn add_document_to_item(&self, params: Value) -> Option<Value> {
        Self::swallow(
            "add_document_to_item",
            self.inner.add_document_to_item(params).await,
        )
    }
}
