//! dram-utils web service
//!
//! 基于 Actix-web 的网络诊断 API：`/api/dns`、`/api/http_ping`、`/api/whois`，
//! 以及 `/` 首页。

pub mod api;
pub mod config;
pub mod error;
pub mod home;
pub mod logging;

use actix_web::web;

pub use error::ApiError;

/// Register every route of the service.
///
/// The caller provides the shared [`ToolboxService`](dram_utils_toolbox::ToolboxService)
/// as `web::Data` app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    api::configure(cfg);
    home::configure(cfg);
}
