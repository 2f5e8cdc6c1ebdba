//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// 工具箱错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 网络错误
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 超时
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Host name resolution failed
    #[error("DNS lookup failed: {0}")]
    DnsLookup(String),

    /// Resolution succeeded but yielded a non-IP address family
    #[error("Unexpected address family: {0}")]
    WrongAddressFamily(String),
}

impl ToolboxError {
    /// Name of the error variant, stable across messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "ValidationError",
            Self::NetworkError(_) => "NetworkError",
            Self::Timeout(_) => "Timeout",
            Self::DnsLookup(_) => "DnsLookup",
            Self::WrongAddressFamily(_) => "WrongAddressFamily",
        }
    }

    /// Whether the failure stems from caller input or the queried host rather than
    /// from this process. Used for log level selection.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::DnsLookup(_) | Self::WrongAddressFamily(_)
        )
    }
}

/// 工具箱 Result 类型别名
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            ToolboxError::NetworkError("x".into()).kind(),
            "NetworkError"
        );
        assert_eq!(ToolboxError::Timeout("x".into()).kind(), "Timeout");
        assert_eq!(
            ToolboxError::ValidationError("x".into()).kind(),
            "ValidationError"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(ToolboxError::DnsLookup("no such host".into())).unwrap();
        assert_eq!(json["code"], "DnsLookup");
        assert_eq!(json["details"], "no such host");
    }

    #[test]
    fn test_is_expected() {
        assert!(ToolboxError::DnsLookup(String::new()).is_expected());
        assert!(!ToolboxError::NetworkError(String::new()).is_expected());
        assert!(!ToolboxError::Timeout(String::new()).is_expected());
    }
}
