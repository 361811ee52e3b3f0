//! Request execution
//!
//! Every API call flows through this module: a [`RequestDescriptor`] is turned
//! into an absolute URL, its body is encoded once, and the executor runs the
//! attempt/retry loop until a response is accepted or a terminal error occurs.

mod download;
mod encoding;
pub(crate) mod executor;
mod multipart;
mod request;
pub(crate) mod url;

pub use download::DownloadResponse;
pub use executor::RequestExecutor;
pub use multipart::{FilePart, MultipartPayload};
pub use request::RequestDescriptor;
pub use url::escape_path_param;
