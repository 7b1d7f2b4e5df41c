//! Retry with exponential back-off and jitter, layered over the client.
//!
//! [`InterpreterClient::interpret`](crate::InterpreterClient::interpret) is
//! deliberately single-shot; callers that want retries wrap it with
//! [`retry_with_backoff`]. Malformed responses are never retried — the
//! service already answered, and asking again does not unbreak a bad
//! payload. Quota exhaustion is a hard stop.

use std::future::Future;
use std::time::Duration;

use crate::error::InterpretError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 5xx: transient server/infrastructure errors.
/// - HTTP 429 rate limiting (but NOT quota exhaustion, see below).
///
/// **Not retriable (hard stop):**
/// - [`InterpretError::QuotaExceeded`] — the account is out of quota.
/// - [`InterpretError::MalformedResponse`] — retrying won't fix it.
/// - [`InterpretError::Configuration`] — client-side bug.
#[must_use]
pub fn is_retriable(err: &InterpretError) -> bool {
    match err {
        InterpretError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        InterpretError::ServiceStatus { status, .. } => *status >= 500 || *status == 429,
        InterpretError::QuotaExceeded(_)
        | InterpretError::MalformedResponse { .. }
        | InterpretError::Configuration(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors.
///
/// Delay doubles each attempt starting at `backoff_base_ms`, with ±25%
/// jitter, capped at 60 s. Non-retriable errors are returned immediately.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-retriable error encountered.
pub async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, InterpretError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, InterpretError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "completion service transient error — retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed() -> InterpretError {
        InterpretError::MalformedResponse {
            context: "test".to_owned(),
            reason: "not json".to_owned(),
        }
    }

    #[test]
    fn server_error_status_is_retriable() {
        assert!(is_retriable(&InterpretError::ServiceStatus {
            status: 500,
            message: "boom".to_owned(),
        }));
    }

    #[test]
    fn rate_limit_429_is_retriable() {
        assert!(is_retriable(&InterpretError::ServiceStatus {
            status: 429,
            message: "rate limit".to_owned(),
        }));
    }

    #[test]
    fn client_error_status_is_not_retriable() {
        assert!(!is_retriable(&InterpretError::ServiceStatus {
            status: 404,
            message: "nope".to_owned(),
        }));
    }

    #[test]
    fn quota_exceeded_is_not_retriable() {
        assert!(!is_retriable(&InterpretError::QuotaExceeded(
            "limit".to_owned()
        )));
    }

    #[test]
    fn malformed_response_is_not_retriable() {
        assert!(!is_retriable(&malformed()));
    }

    #[test]
    fn configuration_error_is_not_retriable() {
        assert!(!is_retriable(&InterpretError::Configuration(
            "bad url".to_owned()
        )));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, InterpretError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_malformed_response() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(malformed())
            }
        })
        .await;
        assert_eq!(
            calls.load(Ordering::SeqCst),
            1,
            "MalformedResponse must not be retried"
        );
        assert!(matches!(
            result,
            Err(InterpretError::MalformedResponse { .. })
        ));
    }

    #[tokio::test]
    async fn retries_transient_status_then_succeeds() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(InterpretError::ServiceStatus {
                        status: 503,
                        message: "unavailable".to_owned(),
                    })
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99, "should succeed after retries");
        assert_eq!(
            calls.load(Ordering::SeqCst),
            3,
            "should have been called 3 times (2 failures + 1 success)"
        );
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_error() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(InterpretError::ServiceStatus {
                    status: 500,
                    message: "boom".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "1 initial + 2 retries");
        assert!(matches!(
            result,
            Err(InterpretError::ServiceStatus { status: 500, .. })
        ));
    }
}
