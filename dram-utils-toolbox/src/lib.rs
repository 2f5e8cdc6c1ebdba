//! Network diagnostics for dram-utils
//!
//! 提供三种网络诊断：DNS 解析、HTTP 可达性探测、WHOIS 查询（带进程级缓存）。
//! 与 HTTP 层无关，由 `dram-utils-web` 暴露为 JSON API。

pub mod address_family;
mod cache;
mod error;
mod services;
mod traits;
mod types;

pub use cache::{WhoisCache, WhoisOutcome};
pub use error::{ToolboxError, ToolboxResult};
pub use services::{PROBE_TIMEOUT, SystemResolver, ToolboxService, WHOIS_TIMEOUT, WhoisClient};
pub use traits::{HostResolver, WhoisSource};
pub use types::{DnsResult, HostEntry, PingResult};
