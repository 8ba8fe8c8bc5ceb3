//! HTTP client for the GLPI REST API.
//!
//! This module provides the `GlpiClient` struct for making authenticated
//! requests against a GLPI instance's `apirest.php` endpoint.
//!
//! # Sessions
//!
//! GLPI authenticates in two steps: `init_session` exchanges Basic-Auth
//! credentials for a session token, and every later call carries that token
//! in the `Session-Token` header next to the static `App-Token`. The client
//! never pre-checks the token locally; a call made without a valid session
//! fails at the server and the resulting status is surfaced as an error.
//!
//! # Status vocabulary
//!
//! GLPI leans on uncommon status codes: 206 marks a truncated result set,
//! 207 a partially-applied batch write, and 204 an empty delete result. All
//! of these are failures here, each with its own [`GlpiError`] variant.
//! Which codes get a dedicated mapping varies per endpoint; the per-method
//! docs spell out the contract.
//!
//! # Security
//!
//! The password, app token and session token are never logged.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::RwLock;
use url::Url;

use crate::config::Config;
use crate::disposition::extract_filename;
use crate::error::GlpiError;
use crate::models::{SessionToken, TicketLink, UploadManifest, WriteEnvelope};

/// Header carrying the session token on every authenticated call.
const SESSION_TOKEN_HEADER: &str = "Session-Token";

/// Header carrying the static application token.
const APP_TOKEN_HEADER: &str = "App-Token";

/// Session lifecycle endpoints.
const INIT_SESSION_PATH: &str = "initSession";
const KILL_SESSION_PATH: &str = "killSession";

/// Ticket relationship endpoints.
const GROUP_TICKET_PATH: &str = "Group_Ticket/";
const TICKET_USER_PATH: &str = "Ticket_User/";
const FOLLOWUP_PATH: &str = "ITILFollowup";
const SOLUTION_PATH: &str = "ITILSolution";
const TICKET_LINK_PATH: &str = "Ticket_Ticket/";

/// Document endpoints. Associations are always posted against document 1;
/// the payload's `documents_id` is what actually binds.
const DOCUMENT_PATH: &str = "Document";
const DOCUMENT_ITEM_PATH: &str = "Document/1/Document_Item";

/// Buffer size for streaming downloads to disk.
const DOWNLOAD_BUFFER: usize = 8 * 1024;

/// HTTP client for the GLPI REST API.
///
/// Handles session management, request formatting and response
/// interpretation for all GLPI operations. Item payloads are schemaless
/// `serde_json::Value`s; the client applies no per-type knowledge beyond
/// the path convention `{item_type}/{id}`.
///
/// Cloning is cheap and clones share the session token, so a session
/// initialized through one clone is visible to all of them.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = GlpiClient::new(&config)?;
///
/// client.init_session().await?;
/// let ticket = client.get_item("Ticket", 42, None).await?;
/// client.kill_session().await?;
/// ```
#[derive(Clone)]
pub struct GlpiClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL ending in `/apirest.php/`.
    base_url: String,

    /// Account user name for the Basic-Auth session exchange.
    user: String,

    /// Account password.
    /// SECURITY: Never log this value!
    password: String,

    /// Static application token sent with every request.
    /// SECURITY: Never log this value!
    app_token: String,

    /// Session token, set by `init_session`, cleared by `kill_session`.
    /// Shared across clones.
    session: Arc<RwLock<Option<String>>>,

    /// Directory downloaded documents are written to.
    documents_dir: PathBuf,

    /// Per-request timeout, for error reporting.
    timeout: Duration,
}

impl GlpiClient {
    /// Creates a new GLPI client from configuration.
    ///
    /// No network call happens here; the session is only established by
    /// [`init_session`](Self::init_session).
    ///
    /// # Errors
    ///
    /// Returns `GlpiError::HttpClient` if the HTTP client fails to
    /// initialize, or `GlpiError::Config` if the host does not form a
    /// valid URL.
    pub fn new(config: &Config) -> Result<Self, GlpiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GlpiError::HttpClient)?;

        let base_url = Self::normalize_base_url(&config.host);
        let _ = Url::parse(&base_url)
            .map_err(|e| GlpiError::invalid_config(format!("invalid GLPI host: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            user: config.user.clone(),
            password: config.password.clone(),
            app_token: config.app_token.clone(),
            session: Arc::new(RwLock::new(None)),
            documents_dir: config.documents_dir.clone(),
            timeout: config.timeout,
        })
    }

    /// Normalizes a host into a base URL ending in `/apirest.php/`.
    ///
    /// A bare host gets the plain `http://` scheme; a host that already
    /// carries a scheme keeps it.
    fn normalize_base_url(host: &str) -> String {
        let host = host.trim().trim_end_matches('/');
        let with_scheme = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        };
        if with_scheme.ends_with("/apirest.php") {
            format!("{}/", with_scheme)
        } else {
            format!("{}/apirest.php/", with_scheme)
        }
    }

    /// The current session token, if a session is established.
    pub async fn session_token(&self) -> Option<String> {
        self.session.read().await.clone()
    }

    /// Wraps this client in the logging-only facade.
    pub fn quiet(self) -> crate::quiet::QuietClient {
        crate::quiet::QuietClient::new(self)
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    /// Starts an authenticated request: session token (when present) plus
    /// app token. The session header is omitted entirely while no session
    /// is established - the server answers 401 and that is surfaced as an
    /// error rather than pre-checked here.
    async fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(method = %method, path = %path, "GLPI API request");

        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method, &url)
            .header(APP_TOKEN_HEADER, &self.app_token);

        if let Some(token) = self.session.read().await.as_ref() {
            req = req.header(SESSION_TOKEN_HEADER, token);
        }

        req
    }

    /// An authenticated request with the JSON content type all
    /// non-multipart calls carry.
    async fn json_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.request(method, path)
            .await
            .header(CONTENT_TYPE, "application/json")
    }

    /// Sends a request, mapping transport failures.
    async fn send(
        &self,
        req: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<Response, GlpiError> {
        req.send().await.map_err(|e| {
            if e.is_timeout() {
                return GlpiError::timeout(self.timeout, operation);
            }
            GlpiError::Http(e)
        })
    }

    /// Splits a response into status and body text.
    async fn read_response(response: Response) -> Result<(StatusCode, String), GlpiError> {
        let status = response.status();
        let body = response.text().await.map_err(GlpiError::Http)?;
        Ok((status, body))
    }

    /// Decodes a JSON body.
    fn decode(body: &str) -> Result<Value, GlpiError> {
        serde_json::from_str(body).map_err(GlpiError::Serialization)
    }

    // ========================================================================
    // Status interpretation
    //
    // Which codes get a dedicated error varies per endpoint, so each group
    // of operations has its own mapping instead of one catch-all.
    // ========================================================================

    /// Error mapping for write operations: 207, 400 and 401 are distinct.
    fn write_error(status: StatusCode, body: String) -> GlpiError {
        match status {
            StatusCode::MULTI_STATUS => GlpiError::MultiStatus { body },
            StatusCode::BAD_REQUEST => GlpiError::BadRequest { body },
            StatusCode::UNAUTHORIZED => GlpiError::Unauthorized,
            status => GlpiError::HttpStatus { status, body },
        }
    }

    /// Error mapping for search: 206, 400 and 401 are distinct.
    fn search_error(status: StatusCode, body: String) -> GlpiError {
        match status {
            StatusCode::PARTIAL_CONTENT => GlpiError::PartialContent { body },
            StatusCode::BAD_REQUEST => GlpiError::BadRequest { body },
            StatusCode::UNAUTHORIZED => GlpiError::Unauthorized,
            status => GlpiError::HttpStatus { status, body },
        }
    }

    /// Error mapping for the document and ticket-link endpoints: 400 and
    /// 401 are distinct.
    fn auth_error(status: StatusCode, body: String) -> GlpiError {
        match status {
            StatusCode::BAD_REQUEST => GlpiError::BadRequest { body },
            StatusCode::UNAUTHORIZED => GlpiError::Unauthorized,
            status => GlpiError::HttpStatus { status, body },
        }
    }

    /// Error mapping for the group and requester assignment endpoints.
    ///
    /// Only 400 gets a dedicated variant here; a 401 surfaces as a plain
    /// status error, unlike every other write operation.
    fn narrow_error(status: StatusCode, body: String) -> GlpiError {
        match status {
            StatusCode::BAD_REQUEST => GlpiError::BadRequest { body },
            status => GlpiError::HttpStatus { status, body },
        }
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Establishes a session, storing the returned token.
    ///
    /// Sends Basic-Auth credentials to `initSession`. The response is
    /// decoded without inspecting the status code: an auth failure comes
    /// back as a JSON error pair that fails to parse as a session token,
    /// which leaves the session unset.
    ///
    /// # Errors
    ///
    /// `GlpiError::Http`/`Timeout` on transport failure,
    /// `GlpiError::Serialization` when the body carries no session token.
    pub async fn init_session(&self) -> Result<(), GlpiError> {
        tracing::debug!("initializing GLPI session");

        let req = self
            .http
            .get(format!("{}{}", self.base_url, INIT_SESSION_PATH))
            .basic_auth(&self.user, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .header(APP_TOKEN_HEADER, &self.app_token);

        let response = self.send(req, "init_session").await?;
        let (_, body) = Self::read_response(response).await?;
        let token: SessionToken = serde_json::from_str(&body)?;

        *self.session.write().await = Some(token.session_token);
        tracing::debug!("GLPI session established");
        Ok(())
    }

    /// Invalidates the session and clears the stored token.
    ///
    /// Like `init_session`, this decodes whatever body comes back without
    /// branching on the status. The token is only cleared once the server's
    /// answer decodes; a transport or decode failure leaves it in place.
    ///
    /// Returns the decoded response body.
    pub async fn kill_session(&self) -> Result<Value, GlpiError> {
        let req = self.json_request(Method::GET, KILL_SESSION_PATH).await;
        let response = self.send(req, "kill_session").await?;
        let (_, body) = Self::read_response(response).await?;
        let decoded = Self::decode(&body)?;

        *self.session.write().await = None;
        tracing::debug!("GLPI session closed");
        Ok(decoded)
    }

    // ========================================================================
    // Generic item operations
    // ========================================================================

    /// Fetches a single item.
    ///
    /// `filter` is an opaque query fragment appended to the path verbatim
    /// (e.g. `"?expand_dropdowns=true"`); the client does not validate it.
    ///
    /// A 206 answer means the server truncated the result; the partial
    /// body is discarded and reported as `GlpiError::PartialContent`. Any
    /// other non-200 status is a plain `GlpiError::HttpStatus`.
    pub async fn get_item(
        &self,
        item_type: &str,
        item_id: u64,
        filter: Option<&str>,
    ) -> Result<Value, GlpiError> {
        let path = match filter {
            Some(filter) => format!("{}/{}/{}", item_type, item_id, filter),
            None => format!("{}/{}", item_type, item_id),
        };

        let req = self.json_request(Method::GET, &path).await;
        let response = self.send(req, "get_item").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::OK => Self::decode(&body),
            StatusCode::PARTIAL_CONTENT => Err(GlpiError::PartialContent { body }),
            status => Err(GlpiError::HttpStatus { status, body }),
        }
    }

    /// Fetches the solutions recorded on a ticket.
    ///
    /// This endpoint decodes whatever body comes back without branching on
    /// the status code; only transport and decode failures are reported.
    pub async fn get_ticket_solution(&self, ticket_id: u64) -> Result<Value, GlpiError> {
        let path = format!("Ticket/{}/{}/", ticket_id, SOLUTION_PATH);

        let req = self.json_request(Method::GET, &path).await;
        let response = self.send(req, "get_ticket_solution").await?;
        let (_, body) = Self::read_response(response).await?;
        Self::decode(&body)
    }

    /// Searches items of a type.
    ///
    /// `filter` is an opaque caller-built query fragment (e.g.
    /// `"?is_deleted=0&criteria..."`), appended verbatim.
    ///
    /// 206, 400 and 401 each map to their own error; a 400 carries the
    /// server's diagnostic body.
    pub async fn search_items(&self, item_type: &str, filter: &str) -> Result<Value, GlpiError> {
        let path = format!("search/{}/{}", item_type, filter);

        let req = self.json_request(Method::GET, &path).await;
        let response = self.send(req, "search_items").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::OK => Self::decode(&body),
            status => Err(Self::search_error(status, body)),
        }
    }

    /// Creates an item, wrapping the payload in the `input` envelope.
    ///
    /// 201 is the success answer; 207, 400 and 401 are distinct errors.
    pub async fn add_item(&self, item_type: &str, data: Value) -> Result<Value, GlpiError> {
        let req = self
            .json_request(Method::POST, item_type)
            .await
            .json(&WriteEnvelope::new(data));
        let response = self.send(req, "add_item").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::write_error(status, body)),
        }
    }

    /// Updates an item.
    ///
    /// `params` is sent as the request body exactly as given; callers wrap
    /// it in `{"input": ...}` themselves when the target type requires it.
    pub async fn update_item(
        &self,
        item_type: &str,
        item_id: u64,
        params: Value,
    ) -> Result<Value, GlpiError> {
        let path = format!("{}/{}", item_type, item_id);

        let req = self.json_request(Method::PATCH, &path).await.json(&params);
        let response = self.send(req, "update_item").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::OK => Self::decode(&body),
            status => Err(Self::write_error(status, body)),
        }
    }

    /// Deletes items of a type.
    ///
    /// GLPI accepts deletions as a PATCH against the bare item-type path;
    /// the ids travel in the payload. A 204 answer reports an empty result
    /// and is treated as a failure (`GlpiError::NoContent`), not a success.
    pub async fn delete_item(&self, item_type: &str, params: Value) -> Result<Value, GlpiError> {
        let req = self
            .json_request(Method::PATCH, item_type)
            .await
            .json(&params);
        let response = self.send(req, "delete_item").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::OK => Self::decode(&body),
            StatusCode::NO_CONTENT => Err(GlpiError::NoContent),
            status => Err(Self::write_error(status, body)),
        }
    }

    // ========================================================================
    // Ticket relationship operations
    // ========================================================================

    /// Assigns a group to a ticket.
    ///
    /// `params` is the full caller-shaped payload, e.g.
    /// `{"input": {"tickets_id": 17160, "groups_id": 145, "type": 1}}`.
    ///
    /// Only 400 gets a dedicated error on this endpoint; a 401 surfaces
    /// as a plain status error.
    pub async fn assign_group_to_ticket(&self, params: Value) -> Result<Value, GlpiError> {
        self.post_assignment(GROUP_TICKET_PATH, params, "assign_group_to_ticket")
            .await
    }

    /// Assigns a requester (user) to a ticket.
    ///
    /// Same payload shape and error contract as
    /// [`assign_group_to_ticket`](Self::assign_group_to_ticket).
    pub async fn assign_requester_to_ticket(&self, params: Value) -> Result<Value, GlpiError> {
        self.post_assignment(TICKET_USER_PATH, params, "assign_requester_to_ticket")
            .await
    }

    /// Shared POST for the two assignment endpoints with the narrow
    /// error mapping.
    async fn post_assignment(
        &self,
        path: &str,
        params: Value,
        operation: &str,
    ) -> Result<Value, GlpiError> {
        let req = self.json_request(Method::POST, path).await.json(&params);
        let response = self.send(req, operation).await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::narrow_error(status, body)),
        }
    }

    /// Adds a follow-up to a ticket.
    ///
    /// `params` is the full caller-shaped payload. 201 succeeds; 207, 400
    /// and 401 are distinct errors.
    pub async fn assign_followup_to_ticket(&self, params: Value) -> Result<Value, GlpiError> {
        self.post_timeline(FOLLOWUP_PATH, params, "assign_followup_to_ticket")
            .await
    }

    /// Records a solution on a ticket.
    ///
    /// Same contract as [`assign_followup_to_ticket`](Self::assign_followup_to_ticket).
    pub async fn assign_solution_to_ticket(&self, params: Value) -> Result<Value, GlpiError> {
        self.post_timeline(SOLUTION_PATH, params, "assign_solution_to_ticket")
            .await
    }

    /// Shared POST for the ticket timeline endpoints.
    async fn post_timeline(
        &self,
        path: &str,
        params: Value,
        operation: &str,
    ) -> Result<Value, GlpiError> {
        let req = self.json_request(Method::POST, path).await.json(&params);
        let response = self.send(req, operation).await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::write_error(status, body)),
        }
    }

    /// Links two tickets, marking the child as a duplicate of the parent.
    ///
    /// The relationship payload is fixed (see [`TicketLink`]); only the
    /// ticket ids vary.
    pub async fn link_tickets(&self, parent_id: u64, child_id: u64) -> Result<Value, GlpiError> {
        let envelope = WriteEnvelope::new(TicketLink::new(parent_id, child_id));

        let req = self
            .json_request(Method::POST, TICKET_LINK_PATH)
            .await
            .json(&envelope);
        let response = self.send(req, "link_tickets").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::auth_error(status, body)),
        }
    }

    // ========================================================================
    // Document operations
    // ========================================================================

    /// Uploads a local file as a GLPI document.
    ///
    /// Sends a multipart POST with two parts: the JSON `uploadManifest`
    /// and the raw file bytes under `filename[0]`. The multipart framing
    /// supplies its own content type, so this is the one call without the
    /// `application/json` header. The file is read up front, so no handle
    /// outlives the call.
    ///
    /// Returns the created document record.
    pub async fn upload_document(&self, file_path: &Path, name: &str) -> Result<Value, GlpiError> {
        let path_string = file_path.to_string_lossy().into_owned();
        let manifest = WriteEnvelope::new(UploadManifest::single(name, path_string.clone()));
        let manifest_json = serde_json::to_string(&manifest)?;

        let bytes = tokio::fs::read(file_path).await?;
        let manifest_part = Part::text(manifest_json)
            .mime_str("application/json")
            .map_err(GlpiError::HttpClient)?;
        let file_part = Part::bytes(bytes)
            .file_name(path_string)
            .mime_str("application/octet-stream")
            .map_err(GlpiError::HttpClient)?;
        let form = Form::new()
            .part("uploadManifest", manifest_part)
            .part("filename[0]", file_part);

        let req = self.request(Method::POST, DOCUMENT_PATH).await.multipart(form);
        let response = self.send(req, "upload_document").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::auth_error(status, body)),
        }
    }

    /// Downloads a document to the configured documents directory.
    ///
    /// The local filename comes from the `Content-Disposition` response
    /// header. A missing header is `GlpiError::MissingDisposition`; a
    /// header without a usable filename, or one carrying path separators,
    /// is `GlpiError::InvalidFilename` - the file is never written under a
    /// name this client cannot vouch for. The body is streamed to disk
    /// through an 8 KiB buffered writer.
    ///
    /// Returns the filename the document was saved under.
    pub async fn download_document(
        &self,
        item_type: &str,
        item_id: u64,
    ) -> Result<String, GlpiError> {
        let path = format!("{}/{}", item_type, item_id);

        let req = self
            .json_request(Method::GET, &path)
            .await
            .header(ACCEPT, "application/octet-stream");
        let mut response = self.send(req, "download_document").await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.map_err(GlpiError::Http)?;
            return Err(Self::auth_error(status, body));
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .ok_or(GlpiError::MissingDisposition)?;
        let disposition = disposition
            .to_str()
            .map_err(|_| GlpiError::MissingDisposition)?;
        let file_name = extract_filename(disposition)
            .ok_or_else(|| GlpiError::InvalidFilename(disposition.to_string()))?
            .to_string();

        if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
            return Err(GlpiError::InvalidFilename(file_name));
        }

        tokio::fs::create_dir_all(&self.documents_dir).await?;
        let target = self.documents_dir.join(&file_name);
        let file = tokio::fs::File::create(&target).await?;
        let mut writer = BufWriter::with_capacity(DOWNLOAD_BUFFER, file);

        while let Some(chunk) = response.chunk().await.map_err(GlpiError::Http)? {
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;

        tracing::debug!(file = %target.display(), "document downloaded");
        Ok(file_name)
    }

    /// Associates a document with an item.
    ///
    /// `params` is the full caller-shaped payload, e.g.
    /// `{"input": {"documents_id": 12, "items_id": 17160, "itemtype": "Ticket"}}`.
    /// The association is posted against the fixed `Document/1` anchor;
    /// GLPI reads the binding from the payload.
    pub async fn add_document_to_item(&self, params: Value) -> Result<Value, GlpiError> {
        let req = self
            .json_request(Method::POST, DOCUMENT_ITEM_PATH)
            .await
            .json(&params);
        let response = self.send(req, "add_document_to_item").await?;
        let (status, body) = Self::read_response(response).await?;

        match status {
            StatusCode::CREATED => Self::decode(&body),
            status => Err(Self::auth_error(status, body)),
        }
    }
}
