//! Default Configuration Values
//!
//! Every default the client falls back to lives here and is passed explicitly
//! into [`ClientConfig`](crate::config::ClientConfig).

use std::time::Duration;

/// HTTP client defaults
pub mod http {
    use super::*;

    /// Base URL of the PandaDoc public API
    pub const BASE_URL: &str = "https://api.pandadoc.com/";

    /// Default request timeout, applied to every attempt
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default User-Agent string
    pub const USER_AGENT: &str = concat!("pandadoc-rs/", env!("CARGO_PKG_VERSION"));

    /// `Accept` value used when a request does not override it
    pub const ACCEPT: &str = "application/json";

    /// `Accept` value for document downloads
    pub const ACCEPT_PDF: &str = "application/pdf";
}

/// Retry defaults
pub mod retry {
    use super::*;

    /// Retries after the first attempt
    pub const MAX_RETRIES: u32 = 2;

    /// Wait before the first retry
    pub const INITIAL_BACKOFF: Duration = Duration::from_millis(200);

    /// Upper bound for the doubling backoff
    pub const MAX_BACKOFF: Duration = Duration::from_secs(2);

    pub const RETRY_ON_429: bool = true;
    pub const RETRY_ON_5XX: bool = true;
}

/// Multipart upload defaults
pub mod multipart {
    /// Form field used for a file part with no field name
    pub const FILE_FIELD: &str = "file";

    /// File name used for a file part with no file name
    pub const FILE_NAME: &str = "upload.bin";

    /// Content type for parts whose type cannot be guessed
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Pagination defaults
pub mod pagination {
    /// Page size assumed by `next_page` when none was set
    pub const PAGE_SIZE: u32 = 50;
}

/// Environment variable names read by `ClientConfig::from_env`
pub mod env {
    pub const API_KEY: &str = "PANDADOC_API_KEY";
    pub const ACCESS_TOKEN: &str = "PANDADOC_ACCESS_TOKEN";
    pub const BASE_URL: &str = "PANDADOC_BASE_URL";
    pub const TIMEOUT_SECS: &str = "PANDADOC_TIMEOUT_SECS";
}
