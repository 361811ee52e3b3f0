//! Cancellation utilities
//!
//! Provides cancellation handles for in-flight API calls. A call observes its
//! handle while the request is on the wire and while it waits between retries.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::{PandaDocError, Result};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Create a handle that is cancelled together with this one, and can also
    /// be cancelled on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Request cancellation. Calls observing this handle fail with
    /// `PandaDocError::Cancelled` at their next suspension point.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Drive `future` to completion unless `cancel` fires first.
pub(crate) async fn run_cancellable<F>(cancel: Option<&CancelHandle>, future: F) -> Result<F::Output>
where
    F: Future,
{
    match cancel {
        Some(handle) => {
            tokio::select! {
                biased;
                _ = handle.cancelled() => Err(PandaDocError::Cancelled),
                output = future => Ok(output),
            }
        }
        None => Ok(future.await),
    }
}

/// Sleep for `delay`, returning early with `Cancelled` if `cancel` fires.
/// A zero delay returns immediately without suspending.
pub(crate) async fn sleep_cancellable(cancel: Option<&CancelHandle>, delay: Duration) -> Result<()> {
    if delay.is_zero() {
        return Ok(());
    }
    run_cancellable(cancel, tokio::time::sleep(delay)).await
}
