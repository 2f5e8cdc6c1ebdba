//! WHOIS lookup module.

use async_trait::async_trait;
use log::debug;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{ToolboxError, ToolboxResult};
use crate::traits::WhoisSource;

/// Embedded WHOIS server mapping (TLD → server).
pub(crate) const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// [`WhoisSource`] that talks to the public WHOIS servers over TCP port 43,
/// following registrar referrals.
pub struct WhoisClient {
    whois: WhoIs,
}

impl WhoisClient {
    /// Build a client from the embedded server table.
    pub fn new() -> ToolboxResult<Self> {
        Self::from_servers(WHOIS_SERVERS)
    }

    /// Build a client from a JSON server table (`{"com": "whois.verisign-grs.com", ...}`).
    pub fn from_servers(servers: &str) -> ToolboxResult<Self> {
        let whois = WhoIs::from_string(servers).map_err(|e| {
            ToolboxError::NetworkError(format!("Failed to initialize WHOIS client: {e}"))
        })?;
        Ok(Self { whois })
    }
}

#[async_trait]
impl WhoisSource for WhoisClient {
    async fn query(&self, host: &str) -> ToolboxResult<String> {
        debug!("[WHOIS] Querying {host}");

        let options = WhoIsLookupOptions::from_string(host)
            .map_err(|e| ToolboxError::ValidationError(format!("Invalid domain: {e}")))?;

        let raw = self
            .whois
            .lookup_async(options)
            .await
            .map_err(|e| ToolboxError::NetworkError(format!("WHOIS query failed: {e}")))?;

        debug!("[WHOIS] {host}: {} bytes", raw.len());
        Ok(raw)
    }
}
