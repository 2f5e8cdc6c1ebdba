//! DNS 查询模块

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::lookup::Lookup;
use log::debug;

use super::resolver::DEFAULT_RESOLVER;
use crate::address_family;
use crate::error::{ToolboxError, ToolboxResult};
use crate::traits::HostResolver;
use crate::types::{DnsResult, HostEntry};

/// Resolve `host` and normalize the answer.
pub async fn dns_lookup(resolver: &dyn HostResolver, host: &str) -> ToolboxResult<DnsResult> {
    let entry = resolver.resolve(host).await?;
    normalize(entry)
}

/// Turn a raw [`HostEntry`] into a [`DnsResult`].
///
/// Rejects non-IP families and drops the IPv4 slot when it repeats the IPv6 one.
pub(crate) fn normalize(entry: HostEntry) -> ToolboxResult<DnsResult> {
    let af = match address_family::family_name(entry.family) {
        Some(name) if address_family::is_internet(name) => name,
        Some(name) => return Err(ToolboxError::WrongAddressFamily(name.to_string())),
        None => {
            return Err(ToolboxError::WrongAddressFamily(format!(
                "UNKNOWN({})",
                entry.family
            )));
        }
    };

    let mut ips = Vec::with_capacity(2);
    if let Some(ip6) = entry.ipv6 {
        ips.push(ip6);
    }
    if let Some(ip4) = entry.ipv4
        && ips.first() != Some(&ip4)
    {
        ips.push(ip4);
    }

    Ok(DnsResult {
        cname: entry.canonical_name,
        aliases: entry.aliases,
        af: af.to_string(),
        ips,
    })
}

/// [`HostResolver`] backed by the system DNS configuration.
///
/// Queries A and AAAA concurrently and reports the CNAME chain seen in either answer.
pub struct SystemResolver {
    resolver: &'static TokioResolver,
}

impl SystemResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: &DEFAULT_RESOLVER,
        }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> ToolboxResult<HostEntry> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(literal_entry(host, ip));
        }

        debug!("[DNS] Resolving {host}");

        let (v6, v4) = tokio::join!(
            self.resolver.ipv6_lookup(host),
            self.resolver.ipv4_lookup(host)
        );

        let (v6, v4) = match (v6, v4) {
            (Err(e), Err(_)) => return Err(ToolboxError::DnsLookup(e.to_string())),
            (v6, v4) => (v6.ok(), v4.ok()),
        };

        let ipv6 = v6
            .as_ref()
            .and_then(|lookup| lookup.iter().next())
            .map(ToString::to_string);
        let ipv4 = v4
            .as_ref()
            .and_then(|lookup| lookup.iter().next())
            .map(ToString::to_string);

        if ipv6.is_none() && ipv4.is_none() {
            return Err(ToolboxError::DnsLookup(format!("no address for {host}")));
        }

        let lookups: Vec<&Lookup> = v6
            .as_ref()
            .map(|l| l.as_lookup())
            .into_iter()
            .chain(v4.as_ref().map(|l| l.as_lookup()))
            .collect();
        let (canonical_name, aliases) = cname_chain(host, &lookups);

        let family = if ipv6.is_some() {
            address_family::inet6()
        } else {
            address_family::inet()
        };

        debug!("[DNS] {host} -> cname={canonical_name}, v6={ipv6:?}, v4={ipv4:?}");

        Ok(HostEntry {
            canonical_name,
            aliases,
            family,
            ipv6,
            ipv4,
        })
    }
}

/// An IP literal resolves to itself.
fn literal_entry(host: &str, ip: IpAddr) -> HostEntry {
    let (family, ipv6, ipv4) = match ip {
        IpAddr::V4(v4) => (address_family::inet(), None, Some(v4.to_string())),
        IpAddr::V6(v6) => (address_family::inet6(), Some(v6.to_string()), None),
    };
    HostEntry {
        canonical_name: host.to_string(),
        aliases: Vec::new(),
        family,
        ipv6,
        ipv4,
    }
}

/// Walk the CNAME records of the answers: every owner name is an alias and the
/// last target is the canonical name.
fn cname_chain(host: &str, lookups: &[&Lookup]) -> (String, Vec<String>) {
    let mut aliases: Vec<String> = Vec::new();
    let mut canonical = host.trim_end_matches('.').to_string();

    for lookup in lookups {
        for record in lookup.record_iter() {
            if let Some(cname) = record.data().as_cname() {
                let owner = record.name().to_string().trim_end_matches('.').to_string();
                if !aliases.contains(&owner) {
                    aliases.push(owner);
                }
                canonical = cname.0.to_string().trim_end_matches('.').to_string();
            }
        }
    }

    (canonical, aliases)
}
