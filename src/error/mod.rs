//! Error Handling Module
//!
//! This module provides the error types surfaced by every client call:
//! - Core error type (`PandaDocError`, `ErrorCategory`)
//! - Structured API errors parsed from non-success responses (`ApiError`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust
//! use pandadoc::error::{ErrorCategory, PandaDocError};
//!
//! let error = PandaDocError::MissingAuthentication;
//! assert_eq!(error.category(), ErrorCategory::Authentication);
//! assert!(!error.is_retryable_status());
//! ```

// Module declarations
pub mod api;
mod conversions;
pub mod types;

// Re-exports for public API
pub use api::ApiError;
pub use types::*;
