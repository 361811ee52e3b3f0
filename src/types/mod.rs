//! Request and response models
//!
//! Response structs ignore unknown fields and default missing ones, so new
//! server-side fields never break decoding. Flexible request payloads are
//! plain [`RawObject`]s.

pub mod common;
pub mod documents;
pub mod oauth;
pub mod product_catalog;
pub mod webhooks;

pub use common::*;
pub use documents::*;
pub use oauth::*;
pub use product_catalog::*;
pub use webhooks::*;
