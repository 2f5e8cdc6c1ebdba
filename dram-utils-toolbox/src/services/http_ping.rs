//! HTTP reachability probe.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use log::debug;
use reqwest::Client;
use tokio::time::timeout;

use crate::types::PingResult;

/// Hard bound on a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

const MAX_REDIRECTS: usize = 5;

/// Shared HTTP client with configured timeout and redirect policy.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(PROBE_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .unwrap_or_default()
});

/// Probe `host` with a single `HEAD` request.
///
/// Never fails: connection errors, timeouts and non-2xx answers all yield
/// [`PingResult::unreachable`].
pub async fn http_ping(host: &str) -> PingResult {
    let url = probe_url(host);
    let start = Instant::now();

    let outcome = timeout(PROBE_TIMEOUT, HTTP_CLIENT.head(&url).send()).await;

    match outcome {
        Ok(Ok(response)) if response.status().is_success() => {
            let elapsed = start.elapsed();
            debug!(
                "[PING] {url} answered {} in {elapsed:?}",
                response.status()
            );
            PingResult::reachable(elapsed.as_secs_f64())
        }
        Ok(Ok(response)) => {
            debug!("[PING] {url} answered {}", response.status());
            PingResult::unreachable()
        }
        Ok(Err(e)) => {
            debug!("[PING] {url} failed: {e}");
            PingResult::unreachable()
        }
        Err(_) => {
            debug!("[PING] {url} timed out after {PROBE_TIMEOUT:?}");
            PingResult::unreachable()
        }
    }
}

/// Ensure the probe target carries a scheme; default to `http://`.
fn probe_url(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
