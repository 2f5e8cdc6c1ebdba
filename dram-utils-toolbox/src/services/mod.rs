//! Service façade exposing all toolbox operations.
//!
//! DNS resolution and HTTP probing are stateless; WHOIS lookups go through the
//! [`WhoisCache`] owned by the [`ToolboxService`] instance.

mod dns;
mod http_ping;
mod resolver;
mod whois;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::cache::{WhoisCache, WhoisOutcome};
use crate::error::{ToolboxError, ToolboxResult};
use crate::traits::{HostResolver, WhoisSource};
use crate::types::{DnsResult, PingResult};

pub use dns::SystemResolver;
pub use http_ping::PROBE_TIMEOUT;
pub use whois::WhoisClient;

/// Default bound on one WHOIS network query, referrals included.
pub const WHOIS_TIMEOUT: Duration = Duration::from_secs(10);

/// Validate and normalise a domain name or IP address input.
///
/// Trims whitespace, passes through valid IP addresses unchanged, converts
/// internationalised domain names (IDN) to ASCII via IDNA 2008, and rejects
/// empty or overlong inputs.
fn validate_domain(domain: &str) -> ToolboxResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ToolboxError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    // If it's a valid IP address, pass through without IDNA processing.
    if domain.parse::<std::net::IpAddr>().is_ok() {
        return Ok(domain.to_string());
    }
    // IDNA processing: converts Unicode labels to Punycode and validates.
    let ascii_domain = idna::domain_to_ascii_strict(domain)
        .map_err(|_| ToolboxError::ValidationError(format!("Invalid domain name: {domain}")))?;
    if ascii_domain.len() > 253 {
        return Err(ToolboxError::ValidationError(format!(
            "Domain name exceeds maximum length of 253 characters (got {})",
            ascii_domain.len()
        )));
    }
    Ok(ascii_domain)
}

/// Entry point for all network diagnostic operations.
///
/// One instance is shared by every request; it owns the WHOIS cache.
///
/// ```rust,no_run
/// use dram_utils_toolbox::ToolboxService;
/// # async fn demo() -> dram_utils_toolbox::ToolboxResult<()> {
/// let toolbox = ToolboxService::new()?;
/// let dns = toolbox.dns_lookup("example.com").await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolboxService {
    resolver: Arc<dyn HostResolver>,
    whois_source: Arc<dyn WhoisSource>,
    whois_cache: WhoisCache,
    whois_timeout: Duration,
}

impl ToolboxService {
    /// Build a service backed by the system resolver and the public WHOIS servers.
    pub fn new() -> ToolboxResult<Self> {
        Ok(Self::with_backends(
            Arc::new(SystemResolver::new()),
            Arc::new(WhoisClient::new()?),
        ))
    }

    /// Build a service on custom backends.
    #[must_use]
    pub fn with_backends(
        resolver: Arc<dyn HostResolver>,
        whois_source: Arc<dyn WhoisSource>,
    ) -> Self {
        Self {
            resolver,
            whois_source,
            whois_cache: WhoisCache::new(),
            whois_timeout: WHOIS_TIMEOUT,
        }
    }

    /// Override the bound on WHOIS network queries.
    #[must_use]
    pub fn with_whois_timeout(mut self, whois_timeout: Duration) -> Self {
        self.whois_timeout = whois_timeout;
        self
    }

    /// Resolve `host` to its canonical name, aliases, address family and addresses.
    ///
    /// Invalid host names are reported as [`ToolboxError::DnsLookup`], like any
    /// other resolution failure. A non-IP address family yields
    /// [`ToolboxError::WrongAddressFamily`].
    pub async fn dns_lookup(&self, host: &str) -> ToolboxResult<DnsResult> {
        let host = validate_domain(host).map_err(|e| ToolboxError::DnsLookup(e.to_string()))?;
        dns::dns_lookup(self.resolver.as_ref(), &host).await
    }

    /// Probe `host` over HTTP with a 3 second bound.
    ///
    /// Unreachable hosts are a regular result, never an error.
    pub async fn http_ping(&self, host: &str) -> PingResult {
        http_ping::http_ping(host).await
    }

    /// Raw WHOIS record for `host`.
    ///
    /// The first call per host queries the network; the outcome, success or
    /// error, is cached for the lifetime of the service and replayed afterwards.
    /// A query running past the WHOIS timeout fails with [`ToolboxError::Timeout`].
    pub async fn whois_lookup(&self, host: &str) -> WhoisOutcome {
        self.whois_cache
            .get_or_compute(host, || async {
                let domain = validate_domain(host)?;
                let raw = timeout(self.whois_timeout, self.whois_source.query(&domain))
                    .await
                    .map_err(|_| {
                        ToolboxError::Timeout(format!(
                            "WHOIS query for {domain} exceeded {:?}",
                            self.whois_timeout
                        ))
                    })??;
                Ok::<Arc<str>, ToolboxError>(Arc::from(raw))
            })
            .await
    }
}
