//! # pandadoc - An async client for the PandaDoc public API
//!
//! Typed request/response models for documents, the product catalog, OAuth and
//! webhooks, on top of a single transport core that owns URL building, body
//! encoding, authentication, retries and error normalization.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pandadoc::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder().api_key("your-api-key").build()?;
//!
//!     let page = client
//!         .documents()
//!         .list(&ListDocumentsOptions {
//!             count: Some(25),
//!             ..Default::default()
//!         })
//!         .await?;
//!     for doc in page.results {
//!         println!("{} {}", doc.id, doc.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every call returns [`PandaDocError`]. API failures carry a structured
//! [`ApiError`] with the status, machine code, message and request id:
//!
//! ```rust,no_run
//! # use pandadoc::prelude::*;
//! # async fn run(client: Client) {
//! match client.documents().status("missing").await {
//!     Err(e) if e.is_not_found() => println!("no such document"),
//!     Err(e) => eprintln!("request failed: {e}"),
//!     Ok(doc) => println!("status: {}", doc.status),
//! }
//! # }
//! ```

#![deny(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod retry;
pub mod services;
pub mod types;
pub mod utils;

pub use client::Client;
pub use config::{ClientBuilder, ClientConfig, ClientOption};
pub use error::{ApiError, ErrorCategory, PandaDocError, Result};
pub use execution::{DownloadResponse, FilePart, MultipartPayload, RequestDescriptor};
pub use retry::{RetryPolicy, RetryPolicyConfig};
pub use utils::cancel::CancelHandle;

/// HTTP method and status types used by [`RequestDescriptor`] and [`ApiError`].
pub use reqwest::{Method, StatusCode};

/// Commonly used types, importable with `use pandadoc::prelude::*`.
pub mod prelude {
    pub use crate::client::Client;
    pub use crate::config::{ClientBuilder, ClientConfig};
    pub use crate::error::{ApiError, PandaDocError, Result};
    pub use crate::execution::{DownloadResponse, FilePart, MultipartPayload, RequestDescriptor};
    pub use crate::retry::{RetryPolicy, RetryPolicyConfig};
    pub use crate::types::*;
    pub use crate::utils::cancel::CancelHandle;
}
