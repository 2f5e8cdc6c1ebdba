//! Address family catalog: socket family code → symbolic name (`"AF_INET"`, ...).

use std::collections::HashMap;
use std::sync::LazyLock;

use socket2::Domain;

/// `AF_UNSPEC` is 0 on every supported platform and has no `Domain` constant.
const AF_UNSPEC: i32 = 0;

static ADDRESS_FAMILIES: LazyLock<HashMap<i32, &'static str>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    table.insert(AF_UNSPEC, "AF_UNSPEC");
    table.insert(i32::from(Domain::IPV4), "AF_INET");
    table.insert(i32::from(Domain::IPV6), "AF_INET6");
    #[cfg(unix)]
    table.insert(i32::from(Domain::UNIX), "AF_UNIX");
    #[cfg(any(target_os = "android", target_os = "fuchsia", target_os = "linux"))]
    table.insert(i32::from(Domain::PACKET), "AF_PACKET");
    #[cfg(any(target_os = "android", target_os = "linux"))]
    table.insert(i32::from(Domain::VSOCK), "AF_VSOCK");
    table
});

/// Symbolic name for a socket family code, `None` when the code is unknown.
#[must_use]
pub fn family_name(code: i32) -> Option<&'static str> {
    ADDRESS_FAMILIES.get(&code).copied()
}

/// IPv4 family code.
#[must_use]
pub fn inet() -> i32 {
    i32::from(Domain::IPV4)
}

/// IPv6 family code.
#[must_use]
pub fn inet6() -> i32 {
    i32::from(Domain::IPV6)
}

/// `AF_INET` and `AF_INET6` both qualify.
#[must_use]
pub fn is_internet(name: &str) -> bool {
    name.starts_with("AF_INET")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inet_names() {
        assert_eq!(family_name(inet()), Some("AF_INET"));
        assert_eq!(family_name(inet6()), Some("AF_INET6"));
        assert_eq!(family_name(0), Some("AF_UNSPEC"));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(family_name(-1), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_unix_is_not_internet() {
        let name = family_name(i32::from(Domain::UNIX)).unwrap_or_default();
        assert_eq!(name, "AF_UNIX");
        assert!(!is_internet(name));
    }

    #[test]
    fn test_is_internet_prefix() {
        assert!(is_internet("AF_INET"));
        assert!(is_internet("AF_INET6"));
        assert!(!is_internet("AF_PACKET"));
        assert!(!is_internet(""));
    }
}
