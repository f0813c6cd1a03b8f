use std::net::IpAddr;

use ipnetwork::IpNetwork;
use url::Url;

use crate::regexes::{EMAIL_REGEX, FQDN_REGEX, MAC_REGEX, PORT_REGEX};
use crate::{Canonical, DataKind, ValidationError};

/// Returns the name of the disallowed range containing `addr`, if any.
fn rejected_range(addr: IpAddr) -> Option<&'static str> {
    let range = match addr {
        IpAddr::V4(v4) if v4.is_unspecified() => "unspecified address",
        IpAddr::V4(v4) if v4.is_loopback() => "loopback address",
        IpAddr::V4(v4) if v4.is_private() => "private address",
        IpAddr::V4(v4) if v4.is_link_local() => "link-local address",
        IpAddr::V4(v4) if v4.is_multicast() => "multicast address",
        IpAddr::V6(v6) if v6.is_unspecified() => "unspecified address",
        IpAddr::V6(v6) if v6.is_loopback() => "loopback address",
        IpAddr::V6(v6) if v6.is_unique_local() => "private address",
        IpAddr::V6(v6) if v6.is_unicast_link_local() => "link-local address",
        IpAddr::V6(v6) if v6.is_multicast() => "multicast address",
        _ => return None,
    };

    Some(range)
}

/// Parses a publicly routable address on behalf of `kind`.
///
/// IPv4-mapped IPv6 addresses are converted to IPv4 before the range check.
fn parse_public_ip(kind: DataKind, value: &str) -> Result<IpAddr, ValidationError> {
    let addr = value
        .parse::<IpAddr>()
        .map_err(|_| ValidationError::format(kind, "not an IP address"))?
        .to_canonical();

    match rejected_range(addr) {
        Some(range) => Err(ValidationError::range(kind, range)),
        None => Ok(addr),
    }
}

/// Canonicalizes a public IPv4 or IPv6 address.
///
/// ```
/// use canon_validation::validate_ip;
///
/// assert_eq!(validate_ip("2001:DB8:0:0::1").unwrap().as_str(), Some("2001:db8::1"));
/// assert!(validate_ip("192.168.1.1").is_err());
/// ```
pub fn validate_ip(value: &str) -> Result<Canonical, ValidationError> {
    let addr = parse_public_ip(DataKind::Ip, value)?;
    Ok(Canonical::new(addr.to_string()))
}

/// Canonicalizes a network based on a public address to its masked CIDR notation.
///
/// Both the given address and the masked network address must be public, so that the canonical
/// form validates again.
pub fn validate_cidr(value: &str) -> Result<Canonical, ValidationError> {
    let kind = DataKind::Cidr;

    let (addr, prefix) = value
        .split_once('/')
        .ok_or_else(|| ValidationError::format(kind, "missing prefix length"))?;
    let addr = parse_public_ip(kind, addr)?;
    let prefix = Some(prefix)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| prefix.parse::<u8>().ok())
        .ok_or_else(|| ValidationError::format(kind, "invalid prefix length"))?;

    let network = IpNetwork::new(addr, prefix)
        .and_then(|network| IpNetwork::new(network.network(), prefix))
        .map_err(|err| ValidationError::format(kind, err.to_string()))?;

    if let Some(range) = rejected_range(network.network()) {
        return Err(ValidationError::range(kind, range));
    }

    Ok(Canonical::new(network.to_string()))
}

/// Canonicalizes a fully qualified domain name to lower case.
pub fn validate_fqdn(value: &str) -> Result<Canonical, ValidationError> {
    let lower = value.to_lowercase();
    if !FQDN_REGEX.is_match(&lower) {
        return Err(ValidationError::format(DataKind::Fqdn, "not a domain name"));
    }
    Ok(Canonical::new(lower))
}

/// Canonicalizes a mailbox to its bare, lower-case address.
///
/// Both `jane@example.com` and `Jane Doe <jane@example.com>` are accepted.
pub fn validate_email(value: &str) -> Result<Canonical, ValidationError> {
    let lower = value.trim().to_lowercase();

    let address = match lower.strip_suffix('>').and_then(|s| s.rsplit_once('<')) {
        Some((_display_name, address)) => address,
        None => &lower,
    };

    if !EMAIL_REGEX.is_match(address) {
        return Err(ValidationError::format(DataKind::Email, "not a mailbox address"));
    }
    Ok(Canonical::new(address))
}

/// Canonicalizes an absolute URL.
///
/// Scheme and host are lower-cased, the rest of the URL keeps its case.
pub fn validate_url(value: &str) -> Result<Canonical, ValidationError> {
    let kind = DataKind::Url;
    let mut url = Url::parse(value).map_err(|err| ValidationError::format(kind, err.to_string()))?;

    if let Some(host) = url.host_str()
        && host.chars().any(char::is_uppercase)
    {
        let host = host.to_lowercase();
        url.set_host(Some(&host))
            .map_err(|err| ValidationError::format(kind, err.to_string()))?;
    }

    Ok(Canonical::new(String::from(url)))
}

/// Canonicalizes a MAC address to upper-case groups joined by `-`.
pub fn validate_mac(value: &str) -> Result<Canonical, ValidationError> {
    let upper = value.to_uppercase();
    if !MAC_REGEX.is_match(&upper) {
        return Err(ValidationError::format(DataKind::Mac, "not a MAC address"));
    }
    Ok(Canonical::new(upper.replace(':', "-")))
}

/// Canonicalizes a port with its transport protocol, such as `443/tcp`.
pub fn validate_port(value: &str) -> Result<Canonical, ValidationError> {
    let lower = value.to_lowercase();
    if !PORT_REGEX.is_match(&lower) {
        return Err(ValidationError::format(
            DataKind::Port,
            "expected 1-65535 followed by /tcp or /udp",
        ));
    }
    Ok(Canonical::new(lower))
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn canonical(result: Result<Canonical, ValidationError>) -> String {
        result.unwrap().as_str().unwrap().to_owned()
    }

    #[test]
    fn test_ip_public() {
        assert_eq!(canonical(validate_ip("8.8.8.8")), "8.8.8.8");
        assert_eq!(canonical(validate_ip("2606:4700:4700::1111")), "2606:4700:4700::1111");
        assert_eq!(canonical(validate_ip("::ffff:8.8.4.4")), "8.8.4.4");
    }

    #[test]
    fn test_ip_rejected_ranges() {
        let cases = [
            ("0.0.0.0", "unspecified address"),
            ("::", "unspecified address"),
            ("127.0.0.1", "loopback address"),
            ("::1", "loopback address"),
            ("10.1.2.3", "private address"),
            ("172.16.0.1", "private address"),
            ("192.168.1.1", "private address"),
            ("fd00::1", "private address"),
            ("169.254.0.1", "link-local address"),
            ("fe80::1", "link-local address"),
            ("224.0.0.1", "multicast address"),
            ("ff02::1", "multicast address"),
            ("::ffff:192.168.1.1", "private address"),
        ];

        for (addr, reason) in cases {
            assert_eq!(
                validate_ip(addr),
                Err(ValidationError::range(DataKind::Ip, reason)),
                "{addr}"
            );
        }
    }

    #[test]
    fn test_ip_malformed() {
        let err = validate_ip("8.8.8").unwrap_err();
        insta::assert_snapshot!(err, @"invalid ip: not an IP address");
    }

    #[test]
    fn test_cidr() {
        assert_eq!(canonical(validate_cidr("8.8.8.8/24")), "8.8.8.0/24");
        assert_eq!(canonical(validate_cidr("8.8.8.0/24")), "8.8.8.0/24");
        assert_eq!(
            canonical(validate_cidr("2001:4860:4860::8888/32")),
            "2001:4860::/32"
        );
        assert!(validate_cidr("8.8.8.8").is_err());
        assert!(validate_cidr("8.8.8.8/33").is_err());
        assert!(validate_cidr("8.8.8.8/x").is_err());
        assert!(validate_cidr("8.8.8.8/").is_err());
        assert!(validate_cidr("8.8.8.8/+24").is_err());
        assert!(validate_cidr("8.8.8.8/ 24").is_err());
        assert_eq!(
            validate_cidr("10.0.0.0/8"),
            Err(ValidationError::range(DataKind::Cidr, "private address"))
        );
    }

    #[test]
    fn test_cidr_masked_into_rejected_range() {
        assert_eq!(
            validate_cidr("8.8.8.8/0"),
            Err(ValidationError::range(DataKind::Cidr, "unspecified address"))
        );
        assert_eq!(
            validate_cidr("192.169.0.1/13"),
            Err(ValidationError::range(DataKind::Cidr, "private address"))
        );
        assert_eq!(
            validate_cidr("2001:4860::1/0"),
            Err(ValidationError::range(DataKind::Cidr, "unspecified address"))
        );
    }

    #[test]
    fn test_cidr_idempotent() {
        for raw in ["8.8.8.8/24", "1.2.3.4/8", "11.0.0.1/8", "2001:4860:4860::8888/48"] {
            let first = canonical(validate_cidr(raw));
            assert_eq!(canonical(validate_cidr(&first)), first, "{raw}");
        }
    }

    #[test]
    fn test_fqdn() {
        assert_eq!(canonical(validate_fqdn("Mail.Example-Corp.COM")), "mail.example-corp.com");
        assert!(validate_fqdn("localhost").is_err());
        assert!(validate_fqdn("-example.com").is_err());
        assert!(validate_fqdn("example.c0m").is_err());
    }

    #[test]
    fn test_email() {
        assert_eq!(canonical(validate_email("Jane.Doe@Example.com")), "jane.doe@example.com");
        assert_eq!(
            canonical(validate_email("Jane Doe <JANE@example.com>")),
            "jane@example.com"
        );
        assert!(validate_email("jane@").is_err());
        assert!(validate_email("not an address").is_err());
    }

    #[test]
    fn test_url() {
        assert_eq!(
            canonical(validate_url("HTTPS://Example.COM/Login?Next=/Home#Top")),
            "https://example.com/Login?Next=/Home#Top"
        );
        assert_eq!(canonical(validate_url("http://example.com")), "http://example.com/");
        assert!(validate_url("/relative/path").is_err());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_mac() {
        assert_eq!(canonical(validate_mac("00:1a:2b:3c:4d:5e")), "00-1A-2B-3C-4D-5E");
        assert_eq!(canonical(validate_mac("00-1A-2B-3C-4D-5E")), "00-1A-2B-3C-4D-5E");
        assert!(validate_mac("00:1a:2b:3c:4d").is_err());
        assert!(validate_mac("001a.2b3c.4d5e").is_err());
    }

    #[test]
    fn test_port() {
        assert_eq!(canonical(validate_port("443/TCP")), "443/tcp");
        assert!(validate_port("0/tcp").is_err());
        assert!(validate_port("65536/udp").is_err());
        assert!(validate_port("443").is_err());
    }
}
