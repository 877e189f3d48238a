use anyhow::Result;
use medidata_db::{connect, MongoSettings};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::Client;
use std::future::Future;
use std::time::Duration;

pub const CONNECT_ATTEMPTS: u32 = 10;
pub const CONNECT_DELAY: Duration = Duration::from_secs(2);

/// Runs `operation` up to `attempts` times, sleeping `delay` between failures
/// that `retryable` accepts. Any other error is returned immediately, and the
/// last error is returned when every attempt fails.
pub async fn with_retry<T, F, Fut, R>(
    attempts: u32,
    delay: Duration,
    retryable: R,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: Fn(&anyhow::Error) -> bool,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !retryable(&e) => return Err(e),
            Err(e) if attempt < attempts => {
                log::warn!(
                    "MongoDB not ready, waiting... (attempt {}/{}: {})",
                    attempt,
                    attempts,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e.context(format!("Gave up after {} attempts", attempts))),
        }
    }
}

/// Whether the server may simply not be up yet. Bad URIs, failed
/// authentication and the like fail the same way on every attempt.
pub fn is_unreachable(error: &anyhow::Error) -> bool {
    error.downcast_ref::<MongoError>().is_some_and(|e| {
        matches!(
            *e.kind,
            ErrorKind::ServerSelection { .. }
                | ErrorKind::Io(_)
                | ErrorKind::ConnectionPoolCleared { .. }
        )
    })
}

/// Waits for the server to come up, as happens when both start together.
pub async fn connect_with_retry(
    settings: &MongoSettings,
    app_name: &str,
    attempts: u32,
    delay: Duration,
) -> Result<Client> {
    with_retry(attempts, delay, is_unreachable, || connect(settings, app_name)).await
}
