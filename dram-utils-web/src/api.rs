//! `/api` 路由：DNS 解析、HTTP ping、WHOIS 查询
//!
//! Every JSON answer is an envelope: `{"status": "success", ...}` or the error
//! envelope built by [`ApiError`]. Any other path or method under `/api` is
//! answered with `not_found`.

use std::collections::HashMap;

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, guard, web};
use dram_utils_toolbox::{ToolboxService, WhoisOutcome};
use serde::Serialize;
use tracing_attributes::instrument;

use crate::error::ApiError;

/// Mount point of the API.
pub const API_PREFIX: &str = "/api";

const WHOIS_RESOURCE: &str = "whois";

type Params = web::Query<HashMap<String, String>>;

/// Register the API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(API_PREFIX)
            .service(endpoint("/dns").route(get_or_head().to(dns)))
            .service(endpoint("/http_ping").route(get_or_head().to(http_ping)))
            .service(
                endpoint("/whois")
                    .name(WHOIS_RESOURCE)
                    .route(get_or_head().to(whois)),
            )
            .default_service(web::to(not_found)),
    );
}

/// A resource whose unmatched methods fall through to `not_found` instead of 405.
fn endpoint(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(not_found))
}

/// GET route that also answers HEAD.
fn get_or_head() -> actix_web::Route {
    web::route().guard(guard::Any(guard::Get()).or(guard::Head()))
}

/// Value of a required query parameter.
///
/// Absent, empty and whitespace-only values all fail with
/// [`ApiError::MissingParameter`].
pub fn required_param<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, ApiError> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::MissingParameter {
            name: name.to_string(),
        })
}

/// `{"status": "success", ...fields of T}`
#[derive(Serialize)]
struct Success<T> {
    status: &'static str,
    #[serde(flatten)]
    body: T,
}

fn success<T: Serialize>(body: T) -> HttpResponse {
    HttpResponse::Ok().json(Success {
        status: "success",
        body,
    })
}

#[derive(Serialize)]
struct WhoisLink {
    url: String,
}

#[instrument(skip_all, fields(host))]
async fn dns(toolbox: web::Data<ToolboxService>, params: Params) -> Result<HttpResponse, ApiError> {
    let host = required_param(&params, "host")?;
    tracing::Span::current().record("host", host);

    let result = toolbox.dns_lookup(host).await?;
    tracing::debug!(af = %result.af, ips = ?result.ips, "resolved");
    Ok(success(result))
}

#[instrument(skip_all, fields(host))]
async fn http_ping(
    toolbox: web::Data<ToolboxService>,
    params: Params,
) -> Result<HttpResponse, ApiError> {
    let host = required_param(&params, "host")?;
    tracing::Span::current().record("host", host);

    let result = toolbox.http_ping(host).await;
    tracing::debug!(reachable = result.result, "probed");
    Ok(success(result))
}

/// Default mode answers with a link to the full record; `see` switches to the
/// HTML rendering of the cached record or error, always with status 200.
#[instrument(skip_all, fields(host))]
async fn whois(
    req: HttpRequest,
    toolbox: web::Data<ToolboxService>,
    params: Params,
) -> Result<HttpResponse, ApiError> {
    let host = required_param(&params, "host")?;
    tracing::Span::current().record("host", host);

    let outcome = toolbox.whois_lookup(host).await;

    if reveal_requested(req.query_string()) {
        return Ok(reveal(&outcome));
    }

    match outcome {
        Ok(_) => Ok(success(WhoisLink {
            url: reveal_url(&req, host),
        })),
        Err(e) => Err(ApiError::whois(&e)),
    }
}

/// `see=<anything>` selects the reveal view; a bare `see` without `=` does not.
fn reveal_requested(query: &str) -> bool {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, _)| urlencoding::decode(key).is_ok_and(|key| key == "see"))
}

async fn not_found() -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound)
}

/// Absolute URL of the reveal view for `host`.
fn reveal_url(req: &HttpRequest, host: &str) -> String {
    let query = format!("see=true&host={}", urlencoding::encode(host));
    match req.url_for_static(WHOIS_RESOURCE) {
        Ok(mut url) => {
            url.set_query(Some(&query));
            url.to_string()
        }
        Err(e) => {
            tracing::warn!("failed to build absolute whois url: {e}");
            format!("{API_PREFIX}/whois?{query}")
        }
    }
}

fn reveal(outcome: &WhoisOutcome) -> HttpResponse {
    let body = match outcome {
        Ok(text) => format!("<pre>{}</pre>", escape_html(text)),
        Err(e) => format!(
            "<pre>\nERROR: {}\n{}\n</pre>\n",
            e.kind(),
            escape_html(&e.to_string())
        ),
    };
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_required_param_present() {
        let p = params(&[("host", "example.com")]);
        assert_eq!(required_param(&p, "host").unwrap(), "example.com");
    }

    #[test]
    fn test_required_param_absent() {
        let err = required_param(&params(&[]), "host").unwrap_err();
        assert_eq!(
            err,
            ApiError::MissingParameter {
                name: "host".to_string()
            }
        );
    }

    #[test]
    fn test_required_param_blank() {
        assert!(required_param(&params(&[("host", "")]), "host").is_err());
        assert!(required_param(&params(&[("host", "  ")]), "host").is_err());
    }

    #[test]
    fn test_reveal_requested() {
        assert!(reveal_requested("see=true&host=a.com"));
        assert!(reveal_requested("host=a.com&see=false"));
        assert!(reveal_requested("host=a.com&see="));
        assert!(reveal_requested("host=a.com&s%65e=1"));
        assert!(!reveal_requested("host=a.com&see"));
        assert!(!reveal_requested("host=a.com"));
        assert!(!reveal_requested("seen=1&host=a.com"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">R&D's</a>"),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_success_envelope_flattens_body() {
        let value = serde_json::to_value(Success {
            status: "success",
            body: WhoisLink {
                url: "http://x/api/whois".to_string(),
            },
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "success", "url": "http://x/api/whois"})
        );
    }
}
