//! Back-off for the Overpass interpreter.
//!
//! Public Overpass instances shed load with 429 (too many requests from one
//! client) and 504 (the query queue is full). Both clear up within seconds,
//! as do dropped connections and per-attempt timeouts. A 400 means the
//! query text itself was rejected, and a body that isn't Overpass JSON will
//! not change on a second try; those fail at once.

use std::future::Future;
use std::time::Duration;

use crate::error::FacilityError;

/// Ceiling for a single back-off sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Whether the interpreter might answer differently if asked again.
pub(crate) fn is_retriable(err: &FacilityError) -> bool {
    match err {
        FacilityError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        FacilityError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        FacilityError::Deserialize { .. }
        | FacilityError::InvalidInput(_)
        | FacilityError::InvalidBaseUrl { .. } => false,
    }
}

/// Sleep before retry number `retry` (1-based).
///
/// Doubles from `base_ms`, is capped at [`MAX_BACKOFF`], then scaled by
/// `jitter`, a factor the caller draws from `[0.75, 1.25)`.
pub(crate) fn backoff_delay(retry: u32, base_ms: u64, jitter: f64) -> Duration {
    let doubled = base_ms.saturating_mul(1u64 << retry.saturating_sub(1).min(10));
    let capped = Duration::from_millis(doubled).min(MAX_BACKOFF);
    capped.mul_f64(jitter)
}

/// Run one interpreter request, retrying transient failures up to
/// `max_retries` more times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut request: F,
) -> Result<T, FacilityError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FacilityError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match request().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retry >= max_retries || !is_retriable(&err) {
            return Err(err);
        }
        retry += 1;
        let delay = backoff_delay(retry, backoff_base_ms, 0.75 + rand::random::<f64>() * 0.5);
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "overpass request failed, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
