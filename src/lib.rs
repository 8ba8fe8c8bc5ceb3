//! # glpi-client
//!
//! An async client for the REST API of [GLPI](https://glpi-project.org/),
//! the open-source IT service management system.
//!
//! ## Features
//!
//! - **Session lifecycle**: exchange Basic-Auth credentials for a session
//!   token, carry it on every call, invalidate it when done
//! - **Generic items**: fetch, search, create, update and delete any GLPI
//!   entity through the uniform `{item_type}/{id}` path convention
//! - **Ticket operations**: assign groups and requesters, add follow-ups
//!   and solutions, link tickets
//! - **Documents**: multipart upload and streamed download with filename
//!   extraction from `Content-Disposition`
//! - **Typed errors**: GLPI's status vocabulary (206/207/400/401/204) maps
//!   to distinct [`GlpiError`] variants, with a logging-only
//!   [`QuietClient`] facade for call sites that prefer `Option` returns
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types covering transport, decoding and GLPI's
//!   status-code vocabulary
//! - [`client`] - HTTP client for the GLPI REST API
//! - [`quiet`] - Logging-only facade returning `Option`
//! - [`models`] - Payload and association models
//! - [`disposition`] - `Content-Disposition` filename extraction
//! - [`logging`] - Subscriber setup helpers
//!
//! ## Configuration
//!
//! Four environment variables are required (a `.env` file works too):
//!
//! - `GLPI_HOST`: Host of the GLPI instance
//! - `GLPI_USER` / `GLPI_PASSWORD`: Account credentials
//! - `GLPI_APP_TOKEN`: Pre-shared application token
//!
//! Optional: `GLPI_DEBUG_MODE`, `GLPI_TIMEOUT_SECS`, `GLPI_DOCUMENTS_DIR`,
//! and `RUST_LOG` for an explicit log filter.
//!
//! ## Security Considerations
//!
//! The password, app token and session token are stored only in memory
//! and are:
//! - Never logged at any log level
//! - Strippable from messages via [`GlpiError::sanitize_message`]
//!
//! ## Example
//!
//! ```ignore
//! use glpi_client::{Config, GlpiClient};
//! use serde_json::json;
//!
//! async fn example() -> Result<(), glpi_client::GlpiError> {
//!     dotenvy::dotenv().ok();
//!     let config = Config::from_env()?;
//!     let client = GlpiClient::new(&config)?;
//!
//!     client.init_session().await?;
//!
//!     let ticket = client
//!         .add_item("Ticket", json!({"name": "Printer is down", "priority": 4}))
//!         .await?;
//!     println!("created ticket {}", ticket["id"]);
//!
//!     client.kill_session().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod disposition;
pub mod error;
pub mod logging;
pub mod models;
pub mod quiet;

pub use client::GlpiClient;
pub use config::Config;
pub use error::GlpiError;
pub use quiet::QuietClient;
