//! Cancellation of in-flight operations.

use crate::error::{ClientError, Result};
use std::future::Future;

/// Run `operation` until it finishes or `signal` completes.
///
/// When the signal wins, the operation future is dropped, which aborts its
/// HTTP request, and [`ClientError::Cancelled`] is returned.
///
/// # Examples
///
/// ```rust,no_run
/// use centralconfig_client::cancel::until_cancelled;
/// use centralconfig_client::prelude::*;
/// use tokio::sync::oneshot;
///
/// # async fn example(client: ConfigClient) -> Result<()> {
/// let (stop, stopped) = oneshot::channel::<()>();
/// let lookup = until_cancelled(client.get("retry_limit"), async {
///     let _ = stopped.await;
/// });
/// drop(stop); // cancels the lookup
/// assert!(lookup.await.unwrap_err().is_cancelled());
/// # Ok(())
/// # }
/// ```
pub async fn until_cancelled<T, F, C>(operation: F, signal: C) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        _ = signal => {
            tracing::debug!("operation cancelled");
            Err(ClientError::Cancelled)
        }
        result = operation => result,
    }
}
