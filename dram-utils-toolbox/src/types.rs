//! Public types returned by toolbox operations.

use serde::{Deserialize, Serialize};

/// Raw answer of a host name resolution, before normalization.
///
/// Mirrors the classic `gethostbyname` shape: one family code for the whole
/// entry and at most one address per family slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    /// Canonical name (last CNAME target, or the queried name).
    pub canonical_name: String,
    /// Names that pointed at the canonical name through CNAME records.
    pub aliases: Vec<String>,
    /// Socket family code, see [`crate::address_family`].
    pub family: i32,
    /// IPv6 slot.
    pub ipv6: Option<String>,
    /// IPv4 slot.
    pub ipv4: Option<String>,
}

/// Normalized DNS resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResult {
    pub cname: String,
    pub aliases: Vec<String>,
    /// Symbolic family name, `"AF_INET"` or `"AF_INET6"`.
    pub af: String,
    /// IPv6 first, then IPv4; never more than two and never duplicated.
    pub ips: Vec<String>,
}

/// HTTP reachability probe result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub result: bool,
    /// Seconds spent on the successful probe; `None` whenever `result` is false.
    pub duration: Option<f64>,
}

impl PingResult {
    /// A probe that did not succeed.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            result: false,
            duration: None,
        }
    }

    /// A probe that succeeded after `secs` seconds.
    #[must_use]
    pub const fn reachable(secs: f64) -> Self {
        Self {
            result: true,
            duration: Some(secs),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_result_unreachable_serializes_null_duration() {
        let json = serde_json::to_value(PingResult::unreachable()).unwrap();
        assert_eq!(json["result"], false);
        assert!(json["duration"].is_null());
    }

    #[test]
    fn test_ping_result_reachable() {
        let json = serde_json::to_value(PingResult::reachable(0.25)).unwrap();
        assert_eq!(json["result"], true);
        assert_eq!(json["duration"], 0.25);
    }

    #[test]
    fn test_dns_result_field_names() {
        let result = DnsResult {
            cname: "example.com".to_string(),
            aliases: vec!["www.example.com".to_string()],
            af: "AF_INET".to_string(),
            ips: vec!["93.184.216.34".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["cname"], "example.com");
        assert_eq!(json["aliases"][0], "www.example.com");
        assert_eq!(json["af"], "AF_INET");
        assert_eq!(json["ips"].as_array().unwrap().len(), 1);
    }
}
