//! Network backends behind the toolbox operations.
//!
//! The production implementations live in [`crate::SystemResolver`] and
//! [`crate::WhoisClient`]; tests substitute their own.

use async_trait::async_trait;

use crate::error::ToolboxResult;
use crate::types::HostEntry;

/// Forward host name resolution.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `host` to its canonical name, aliases and addresses.
    ///
    /// Any failure (unknown host, network error, timeout) is reported as
    /// [`ToolboxError::DnsLookup`](crate::ToolboxError::DnsLookup).
    async fn resolve(&self, host: &str) -> ToolboxResult<HostEntry>;
}

/// Raw WHOIS query.
#[async_trait]
pub trait WhoisSource: Send + Sync {
    /// Query the registry responsible for `host` and return the raw response text.
    async fn query(&self, host: &str) -> ToolboxResult<String>;
}
