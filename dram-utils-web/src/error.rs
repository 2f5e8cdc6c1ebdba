//! API 错误类型与统一错误响应

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use dram_utils_toolbox::ToolboxError;
use serde_json::{Value, json};
use thiserror::Error;

/// Every way an API request can fail.
///
/// All variants are answered with HTTP 400 and the error envelope
/// `{"status": "error", "error": {"type", "msg", "details"}}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No API under the requested path.
    #[error("No such API. ")]
    NotFound,

    /// A required query parameter is absent or empty.
    #[error("Required parameter {name} missing. ")]
    MissingParameter { name: String },

    #[error("DNS lookup failed")]
    DnsLookup,

    /// Resolution produced a family other than `AF_INET`/`AF_INET6`.
    #[error("DNS lookup returned a non-IP address family")]
    DnsWrongAddressFamily { af: String },

    #[error("Whois failed")]
    Whois {
        error_class: String,
        error_msg: String,
    },
}

impl ApiError {
    /// Value of `error.type` in the envelope.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::DnsLookup => "dns_lookup_error",
            Self::DnsWrongAddressFamily { .. } => "dns_wrong_af_error",
            Self::Whois { .. } => "whois_error",
        }
    }

    /// Structured context for `error.details`.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::NotFound | Self::DnsLookup => json!({}),
            Self::MissingParameter { name } => json!({ "name": name }),
            Self::DnsWrongAddressFamily { af } => json!({ "af": af }),
            Self::Whois {
                error_class,
                error_msg,
            } => json!({ "error_class": error_class, "error_msg": error_msg }),
        }
    }

    /// Full error envelope.
    #[must_use]
    pub fn envelope(&self) -> Value {
        json!({
            "status": "error",
            "error": {
                "type": self.error_type(),
                "msg": self.to_string(),
                "details": self.details(),
            }
        })
    }

    /// Caused by the caller or the queried host rather than by this service.
    /// Used for log level selection.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Whois { error_class, .. } if error_class != "ValidationError")
    }

    /// WHOIS failure carrying the class and message of the underlying error.
    #[must_use]
    pub fn whois(err: &ToolboxError) -> Self {
        Self::Whois {
            error_class: err.kind().to_string(),
            error_msg: err.to_string(),
        }
    }
}

impl From<ToolboxError> for ApiError {
    /// Maps DNS operation failures; WHOIS failures go through [`ApiError::whois`].
    fn from(err: ToolboxError) -> Self {
        match err {
            ToolboxError::WrongAddressFamily(af) => Self::DnsWrongAddressFamily { af },
            _ => Self::DnsLookup,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_expected() {
            tracing::warn!(error_type = self.error_type(), "{self}");
        } else {
            tracing::error!(error_type = self.error_type(), details = %self.details(), "{self}");
        }
        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .body(self.envelope().to_string())
    }
}
