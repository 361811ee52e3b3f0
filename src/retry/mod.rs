//! Retry Mechanism Module
//!
//! Retry classification and backoff for the request executor:
//! - `RetryPolicyConfig` is what callers configure
//! - `RetryPolicy` is the normalized form the executor runs with
//! - `parse_retry_after` reads server-provided wait hints

mod policy;
mod retry_after;

pub use policy::{RetryPolicy, RetryPolicyConfig};
pub use retry_after::parse_retry_after;
